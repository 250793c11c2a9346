use clap::Args;
use timewise_core::time::format_time_hm;
use timewise_core::Operation;

use super::today::print_events;
use super::Session;

#[derive(Args)]
pub struct PromptArgs {
    /// What to do, e.g. "move gym at 7pm for 1h"
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Output operations and timeline as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PromptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.text.join(" ");
    let mut session = Session::open()?;
    let now = session.now();
    let submission = session.planner.submit(&text, now);
    session.save()?;

    if args.json {
        let out = serde_json::json!({
            "operations": submission.operations,
            "summary": submission.summary,
            "timeline": session.planner.timeline(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for op in &submission.operations {
        println!("{}", describe(op));
    }
    let s = submission.summary;
    if s.is_empty() {
        println!("nothing changed");
    } else {
        println!(
            "added {}, moved {}, deleted {}, shifted {}",
            s.added, s.moved, s.deleted, s.shifted
        );
    }
    println!("Today:");
    print_events(session.planner.timeline());
    Ok(())
}

fn describe(op: &Operation) -> String {
    match op {
        Operation::AddEvent { event } => format!(
            "add \"{}\" {} {}-{}",
            event.title,
            event.start.date(),
            format_time_hm(event.start),
            format_time_hm(event.end)
        ),
        Operation::MoveEvent { id, start, end } => format!(
            "move {id} to {} {}-{}",
            start.date(),
            format_time_hm(*start),
            format_time_hm(*end)
        ),
        Operation::DeleteByTitle { title } => format!("delete events matching \"{title}\""),
        Operation::ShiftDay {
            date,
            delta_minutes,
        } => format!("shift {date} by {delta_minutes}m"),
    }
}
