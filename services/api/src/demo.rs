use crate::infra::{seed_fixtures, Board, FIXTURE_EMPLOYERS, FIXTURE_SEEKERS};
use clap::Args;
use job_board::applications::{ApplicationSubmission, ApplicationWithJob};
use job_board::error::AppError;
use job_board::identity::{Principal, Role};
use job_board::jobs::{JobFilter, JobPosting, Pagination};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Start from empty stores instead of the fixture data set.
    #[arg(long)]
    pub(crate) skip_fixtures: bool,
    /// Print the final listings as JSON instead of a table.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        skip_fixtures,
        json,
    } = args;

    println!("Job board demo");
    let board = Board::in_memory();
    if !skip_fixtures {
        let summary = seed_fixtures(&board)?;
        println!(
            "- Loaded {} fixture jobs and {} applications",
            summary.jobs, summary.applications
        );
    }

    let employer = Principal::new(FIXTURE_EMPLOYERS[0], Role::Employer);
    let rival = Principal::new(FIXTURE_EMPLOYERS[1], Role::Employer);
    let seeker = Principal::new(FIXTURE_SEEKERS[1], Role::JobSeeker);

    let job = board.jobs.create_job(
        &employer,
        JobPosting {
            title: "Rust Backend Engineer".to_string(),
            description: "Own the hiring pipeline services end to end".to_string(),
            company: "FinTech Solutions".to_string(),
            location: "Remote".to_string(),
            salary: "negotiable".to_string(),
            employment_type: "full-time".to_string(),
            category: "IT".to_string(),
            requirements: "Production Rust experience".to_string(),
            benefits: "Flexible hours".to_string(),
        },
    )?;
    println!(
        "\n{} posted job {} \"{}\"",
        employer.subject_id, job.id, job.posting.title
    );

    let submission = ApplicationSubmission {
        job_id: job.id,
        message: "I have shipped axum services for three years".to_string(),
    };
    let application = board.applications.submit(&seeker, submission.clone())?;
    println!(
        "{} applied -> application {} is {}",
        seeker.subject_id, application.id, application.status
    );

    match board.applications.submit(&seeker, submission) {
        Ok(_) => println!("  Duplicate submission unexpectedly accepted"),
        Err(err) => println!("  Second submission refused: {err}"),
    }

    match board
        .applications
        .set_status(&rival, application.id, "accepted")
    {
        Ok(_) => println!("  Rival employer unexpectedly decided the application"),
        Err(err) => println!("  {} cannot decide it: {err}", rival.subject_id),
    }

    let decided = board
        .applications
        .set_status(&employer, application.id, "accepted")?;
    println!(
        "{} set application {} to {}",
        employer.subject_id, decided.id, decided.status
    );

    let page = board.jobs.list_jobs(
        &JobFilter {
            search: Some("rust".to_string()),
            ..JobFilter::default()
        },
        Pagination::default(),
    )?;
    println!(
        "\nPublic search for \"rust\": {} match(es) on page {}",
        page.total, page.page
    );

    let mine = board.applications.list_for_applicant(&seeker)?;
    let inbox = board.applications.list_for_employer(&employer)?;

    if json {
        let payload = serde_json::json!({
            "applicant": mine,
            "employer": inbox,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => println!("Listings unavailable: {err}"),
        }
        return Ok(());
    }

    println!("\nApplications of {}:", seeker.subject_id);
    render_applications(&mine);
    println!("\nInbox of {}:", employer.subject_id);
    render_applications(&inbox);

    Ok(())
}

fn render_applications(entries: &[ApplicationWithJob]) {
    if entries.is_empty() {
        println!("  (none)");
        return;
    }
    for entry in entries {
        println!(
            "  - #{} {:<9} {} -> {} ({}, {})",
            entry.application.id,
            entry.application.status.label(),
            entry.application.applicant_id,
            entry.job.posting.title,
            entry.job.posting.company,
            entry.application.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
}
