use canteen_app::{
    context::AppContext,
    domain::feedback::{
        FeedbackServiceError, feedback_allowed, models::NewFeedback, submit_when_allowed,
    },
    session::Session,
};
use clap::{Args, Subcommand};

use super::{describe, expire_session};

#[derive(Debug, Args)]
pub(crate) struct FeedbackCommand {
    #[command(subcommand)]
    command: FeedbackSubcommand,
}

#[derive(Debug, Subcommand)]
enum FeedbackSubcommand {
    /// Check whether feedback can be left for an order
    Check(OrderArgs),
    /// Rate a delivered order
    Submit(SubmitArgs),
    /// Show the feedback left for an order
    Show(OrderArgs),
}

#[derive(Debug, Args)]
struct OrderArgs {
    order_id: String,
}

#[derive(Debug, Args)]
struct SubmitArgs {
    order_id: String,

    /// Stars from 1 to 5
    #[arg(long)]
    rating: u8,

    #[arg(long, default_value = "")]
    comment: String,
}

pub(crate) async fn run(
    ctx: &AppContext,
    session: &mut Session,
    command: FeedbackCommand,
) -> Result<(), String> {
    let result = match command.command {
        FeedbackSubcommand::Check(args) => {
            if feedback_allowed(ctx.feedback.as_ref(), &args.order_id).await {
                println!("feedback can be left for order {}", args.order_id);
            } else {
                println!("feedback is not available for order {}", args.order_id);
            }

            Ok(())
        }
        FeedbackSubcommand::Submit(args) => submit(ctx, args).await,
        FeedbackSubcommand::Show(args) => show(ctx, args).await,
    };

    match result {
        Err(FeedbackServiceError::Unauthorized) => Err(expire_session(session).await),
        Err(error) => Err(describe(&error)),
        Ok(()) => Ok(()),
    }
}

async fn submit(ctx: &AppContext, args: SubmitArgs) -> Result<(), FeedbackServiceError> {
    let rating = args.rating.try_into()?;

    submit_when_allowed(
        ctx.feedback.as_ref(),
        NewFeedback {
            order_id: args.order_id,
            rating,
            comment: args.comment.trim().to_string(),
        },
    )
    .await?;

    println!("Thanks for your feedback!");

    Ok(())
}

async fn show(ctx: &AppContext, args: OrderArgs) -> Result<(), FeedbackServiceError> {
    let Some(feedback) = ctx.feedback.order_feedback(args.order_id.clone()).await? else {
        println!("no feedback for order {}", args.order_id);
        return Ok(());
    };

    println!("rating: {}", "*".repeat(usize::from(feedback.rating)));

    if !feedback.comment.is_empty() {
        println!("comment: {}", feedback.comment);
    }

    if let Some(created_at) = feedback.created_at {
        println!("created_at: {created_at}");
    }

    Ok(())
}
