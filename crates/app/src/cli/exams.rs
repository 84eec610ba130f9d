use canteen::university_id::match_range;
use canteen_app::context::AppContext;
use clap::Args;

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct IdCheckArgs {
    /// University ID to check
    user: String,

    /// First registered university ID
    start: String,

    /// Last registered university ID
    end: String,
}

pub(crate) async fn list(ctx: &AppContext) -> Result<(), String> {
    let exams = ctx
        .exams
        .exams_next_24_hours()
        .await
        .map_err(|error| format!("failed to load exams: {}", describe(&error)))?;

    if exams.is_empty() {
        println!("no exams in the next 24 hours");
        return Ok(());
    }

    for exam in exams {
        println!("exam_id: {}", exam.exam_id);
        println!("exam: {}", exam.label());
        println!(
            "registered_ids: {} to {}",
            exam.start_university_id, exam.end_university_id
        );
        println!();
    }

    Ok(())
}

pub(crate) fn id_check(args: &IdCheckArgs) -> Result<(), String> {
    match match_range(&args.user, &args.start, &args.end).rejection() {
        None => {
            println!(
                "{} is within {} to {}",
                args.user.trim().to_uppercase(),
                args.start.trim().to_uppercase(),
                args.end.trim().to_uppercase()
            );

            Ok(())
        }
        Some(rejection) => Err(rejection.to_string()),
    }
}
