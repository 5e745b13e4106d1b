use crate::infra::{load_request, render_report, ReportFormat};
use clap::Args;
use incident_ai::error::AppError;
use incident_ai::workflows::incident::{
    Attachment, HeuristicAnalyzer, IncidentAnalyzer, IncidentBasics, QuestionRound, WizardStep,
    QA, SKIPPED_ANSWER,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file with `basics` and an optional `qa` list
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format for the assembled report
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    pub(crate) format: ReportFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Pin the follow-up question shuffle for a reproducible walkthrough
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    pub(crate) format: ReportFormat,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let request = load_request(&args.input)?;
    let analyzer = HeuristicAnalyzer::default();
    let report = analyzer.final_report(&request.basics, &request.qa)?;
    println!("{}", render_report(&report, args.format)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let analyzer = HeuristicAnalyzer::with_seed(args.seed);
    let basics = sample_basics();
    let history = walk_follow_ups(&analyzer, &basics)?;

    let report = analyzer.final_report(&basics, &history)?;
    println!("\n== {} ==", WizardStep::FinalReport.label());
    println!(
        "Assessment: {}/100 ({}, {})\n",
        report.incident_score.total_score,
        report.risk_level.label(),
        report.risk_type.label()
    );
    println!("{}", render_report(&report, args.format)?);
    Ok(())
}

/// Answers every served question with a scripted reply until the generator is done.
fn walk_follow_ups(
    analyzer: &impl IncidentAnalyzer,
    basics: &IncidentBasics,
) -> Result<Vec<QA>, AppError> {
    let mut history = Vec::new();
    println!("Incident assessment demo");
    println!("\n== {} ==", WizardStep::Basics.label());
    println!("Reported: {}", basics.what_happened);
    println!("\n== {} ==", WizardStep::FollowUps.label());

    loop {
        let round = QuestionRound::from_history_len(history.len());
        let batch = analyzer.next_questions(basics, &history)?;
        if batch.is_complete() {
            break;
        }
        println!("\n{round:?} round");
        if let Some(rationale) = &batch.rationale {
            println!("  ({rationale})");
        }
        for question in batch.questions {
            let answer = scripted_answer(history.len());
            println!("  Q: {question}\n  A: {answer}");
            history.push(QA::new(question, answer));
        }
    }

    Ok(history)
}

fn scripted_answer(index: usize) -> &'static str {
    const ANSWERS: [&str; 4] = [
        "Yes, this is the third time this quarter and other employees have seen it.",
        "Morgan is the shift supervisor and Taylor reports directly to Morgan.",
        "Taylor saved the chat messages and two emails from that week.",
        "Taylor's weekend shifts were taken away two days after raising the concern.",
    ];
    ANSWERS
        .get(index)
        .copied()
        .unwrap_or(SKIPPED_ANSWER)
}

fn sample_basics() -> IncidentBasics {
    IncidentBasics {
        what_happened: "During the morning huddle Morgan mocked Taylor's accent in front of \
                        the team and said people like Taylor should not be leads"
            .to_string(),
        involved_parties: vec![
            "Taylor".to_string(),
            "Morgan".to_string(),
            "Priya".to_string(),
        ],
        location: "Fulfillment center, floor 2".to_string(),
        datetime: "2025-04-17T07:30".to_string(),
        attachments: vec![Attachment {
            name: "Team chat excerpt".to_string(),
            url: "https://files.example.com/incidents/chat-excerpt.png".to_string(),
        }],
    }
}
