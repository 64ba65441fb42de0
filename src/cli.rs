use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use console::{pad_str, style, Alignment, StyledObject};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::args::Args;
use crate::config;
use crate::ir::{JobKey, WorkLogRecord};
use crate::jira_api::{self, Jira};
use crate::operations::{group_by, TimesheetSummary};
use crate::pipeline::{self, ImportOutcome};
use crate::terminal::{self, BulletPointPrinter, LineWriter};
use crate::upload::{RecordOutcome, RecordResult, UploadMode, UploadReport};

const JOB_KEY_WIDTH: usize = 14;

pub async fn main(args: Args) -> Result<()> {
    // Credentials are checked before the source file is even read
    let auth = config::resolve_jira_auth(args.config_file.as_deref(), args.jira_overrides())?;
    let prepared = pipeline::prepare_file(&args.source_file, &args.strip_policy())?;

    let printer = BulletPointPrinter::new_stdout();
    println!("{}", style_header("Timesheet:"));
    print_summary(
        &printer,
        &prepared.consolidated.date_headers,
        &prepared.summary,
    );
    println!();
    println!("{}", style_header("Work logs by day:"));
    print_work_logs(&printer, &prepared.work_logs);
    println!();

    let jira = Jira::new(&auth)?;
    let user = jira_api::test_connection(&jira)
        .await
        .context("Unable to connect to JIRA")?;
    println!(
        "Connected to {} as {}",
        style(auth.url().as_str()).cyan(),
        style(user).bold()
    );

    let mode = if args.live {
        UploadMode::Live
    } else {
        UploadMode::DryRun
    };
    let num_work_logs = prepared.work_logs.len();
    let mp = MultiProgress::new();
    let mut progress: Option<ProgressBar> = None;
    let outcome = pipeline::run_import(
        &jira,
        prepared.work_logs,
        mode,
        usize::from(args.concurrency),
        |num_work_logs| {
            terminal::prompt_yes_no(&format!(
                "LIVE mode selected. Proceed with importing {num_work_logs} time entries?"
            ))
        },
        |result| {
            let progress =
                progress.get_or_insert_with(|| mp.add(new_progress_bar(num_work_logs)));
            let line = describe_result(progress.position() + 1, num_work_logs, result);
            BulletPointPrinter::new_multiprogress(&mp).print_item(style_outcome(&line, result));
            progress.inc(1);
        },
    )
    .await?;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    match outcome {
        ImportOutcome::Declined => println!("Exiting..."),
        ImportOutcome::Completed(report) => {
            println!();
            print_report(&printer, &report);
        }
    }
    Ok(())
}

fn new_progress_bar(len: usize) -> ProgressBar {
    let progress = ProgressBar::new(len as u64);
    if let Ok(progress_style) =
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {elapsed_precise}")
    {
        progress.set_style(progress_style.progress_chars("=> "));
    }
    progress
}

fn print_summary<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    date_headers: &[String],
    summary: &TimesheetSummary,
) {
    for (date, minutes) in date_headers.iter().zip(&summary.daily_totals) {
        printer.print_item(format!(
            "{} {}",
            pad_str(date, 10, Alignment::Left, None),
            style_minutes(*minutes)
        ));
    }
    printer.print_item(style(summary_line(summary)).bold());
}

fn summary_line(summary: &TimesheetSummary) -> String {
    format!(
        "Total: {} mins ({:.2} hours) for {} days and {} jobs",
        summary.total_minutes,
        summary.total_hours(),
        summary.num_days,
        summary.num_jobs,
    )
}

fn print_work_logs<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    work_logs: &[WorkLogRecord],
) {
    if work_logs.is_empty() {
        printer.print_item(style("(none)").italic());
        return;
    }
    for (date, work_logs) in group_by(work_logs.iter(), |work_log| work_log.date, |w| w) {
        printer.print_item(style_date(&date));
        let printer = printer.indent();
        for work_log in work_logs {
            printer.print_item(format!(
                "{} {}",
                pad_str(
                    &style_job_key(&work_log.job_key).to_string(),
                    JOB_KEY_WIDTH,
                    Alignment::Left,
                    None
                ),
                style_minutes(work_log.minutes),
            ));
        }
    }
}

fn describe_result(position: u64, total: usize, result: &RecordResult) -> String {
    let work_log = &result.work_log;
    let started = jira_api::format_started(&work_log.date);
    match &result.outcome {
        RecordOutcome::Submitted => format!(
            "{position}/{total}: Successfully added work log of {} minutes to issue {} on {started}.",
            work_log.minutes, work_log.job_key,
        ),
        RecordOutcome::WouldSubmit => format!(
            "{position}/{total}: Would have added work log of {} minutes to issue {} on {started}.",
            work_log.minutes, work_log.job_key,
        ),
        RecordOutcome::IssueNotFound(_) => format!(
            "{position}/{total}: Could not find issue with key {}. Skipping...",
            work_log.job_key,
        ),
        RecordOutcome::SubmissionFailed(reason) => format!(
            "{position}/{total}: Could not add work log to issue {}. Reason: {reason}",
            work_log.job_key,
        ),
    }
}

fn print_report<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, report: &UploadReport) {
    let manual_entries = report.manual_entries();
    if !manual_entries.is_empty() {
        println!(
            "{}",
            style_header("The following jobs need to be entered manually:")
        );
        print_manual_entries(printer, &manual_entries);
        println!();
    }

    let failed_submissions: Vec<_> = report.failed_submissions().collect();
    if !failed_submissions.is_empty() {
        println!("{}", style_header("The following work logs could not be added:"));
        for (work_log, reason) in failed_submissions {
            printer.print_item(format!(
                "{} {} {}: {}",
                style_job_key(&work_log.job_key),
                style_date(&work_log.date),
                style_minutes(work_log.minutes),
                style(reason).red(),
            ));
        }
        println!();
    }

    println!("{}", style_header("Totals:"));
    for line in total_lines(report) {
        printer.print_item(line);
    }
}

fn print_manual_entries<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    manual_entries: &[(JobKey, Vec<&WorkLogRecord>)],
) {
    for (job_key, work_logs) in manual_entries {
        printer.print_item(style_job_key(job_key));
        let printer = printer.indent();
        for work_log in work_logs {
            printer.print_item(format!(
                "{} {}",
                style_date(&work_log.date),
                style_minutes(work_log.minutes)
            ));
        }
    }
}

fn total_lines(report: &UploadReport) -> Vec<String> {
    let submitted = match report.mode {
        UploadMode::Live => "Hours logged in JIRA",
        UploadMode::DryRun => "Hours that would have been logged in JIRA",
    };
    vec![
        format!("Work logs processed: {}", report.records_processed()),
        format!("Total hours worked: {:.2} hours", report.hours_processed()),
        format!("{submitted}: {:.2} hours", report.hours_submitted()),
    ]
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_job_key(job_key: &JobKey) -> StyledObject<&str> {
    style(job_key.as_str()).cyan().bold()
}

fn style_date(date: &DateTime<Utc>) -> StyledObject<String> {
    style(date.format("%d/%m/%Y").to_string()).magenta()
}

fn style_minutes(minutes: u64) -> StyledObject<String> {
    style(format!("{minutes} mins")).yellow()
}

fn style_outcome<'a>(line: &'a str, result: &RecordResult) -> StyledObject<&'a str> {
    match result.outcome {
        RecordOutcome::Submitted => style(line).green(),
        RecordOutcome::WouldSubmit => style(line).blue(),
        RecordOutcome::IssueNotFound(_) | RecordOutcome::SubmissionFailed(_) => style(line).red(),
    }
}
