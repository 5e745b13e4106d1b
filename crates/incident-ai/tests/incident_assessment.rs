//! End-to-end scenarios for a full assessment session driven through the
//! public API: follow-up rounds, scoring, planning, and report export.

mod common {
    use incident_ai::workflows::incident::{Attachment, IncidentBasics};

    pub(super) fn basics(what_happened: &str, parties: &[&str]) -> IncidentBasics {
        IncidentBasics {
            what_happened: what_happened.to_string(),
            involved_parties: parties.iter().map(|name| name.to_string()).collect(),
            location: "Distribution center, dock 4".to_string(),
            datetime: "2025-06-12T08:45".to_string(),
            attachments: vec![Attachment {
                name: "Badge log".to_string(),
                url: "https://files.example.com/badge-log.csv".to_string(),
            }],
        }
    }
}

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use common::basics;
use incident_ai::workflows::incident::{
    assemble, categorize, is_permitted_question, next_questions_with_rng, plan, render_markdown,
    score, section_headings, QuestionRound, RiskLevel, WizardStep, MAX_NEXT_STEPS, QA,
};

const LAW_ENFORCEMENT_PREFIX: &str = "Contact law enforcement immediately";

#[test]
fn wizard_session_answers_every_question_then_reports() {
    let basics = basics(
        "Supervisor Dana made repeated comments about Sam's religion in front of the team",
        &["Sam", "Dana", "Riley"],
    );
    let mut rng = StdRng::seed_from_u64(2025);
    let mut history: Vec<QA> = Vec::new();
    let mut step = WizardStep::first(false);

    step = step.next(&basics, None).expect("basics complete");
    assert_eq!(step, WizardStep::AdditionalDetails);
    step = step.next(&basics, None).expect("datetime provided");
    assert_eq!(step, WizardStep::FollowUps);

    let mut served_per_round = Vec::new();
    loop {
        let round = QuestionRound::from_history_len(history.len());
        let batch = next_questions_with_rng(&basics, &history, &mut rng).expect("valid basics");
        if let Some(next) = step.next(&basics, Some(&batch)) {
            assert_eq!(round, QuestionRound::Complete);
            step = next;
            break;
        }
        served_per_round.push(batch.questions.len());
        for question in batch.questions {
            history.push(QA::new(
                question,
                "It has happened several times and a few coworkers saw it.",
            ));
        }
    }

    assert_eq!(served_per_round, vec![2, 1]);
    let unique: HashSet<&str> = history.iter().map(|qa| qa.question.as_str()).collect();
    assert_eq!(unique.len(), history.len());
    assert!(step.needs_report(false));

    let report = assemble(&basics, &history).expect("report assembles");
    assert_eq!(report.incident_details.follow_up.len(), 3);
    assert_eq!(report.categorized_parties.witnesses.len(), 1);
    assert!(report.risk_level >= RiskLevel::Moderate);
    assert_eq!(report.general_information.incident_time.as_deref(), Some("08:45"));
    assert_eq!(report.evidence.as_ref().map(Vec::len), Some(1));
}

#[test]
fn one_answer_per_round_walks_all_three_rounds() {
    let basics = basics("Coworker shouted at Sam in the cafeteria", &["Sam", "Ari"]);
    let mut rng = StdRng::seed_from_u64(9);
    let mut history: Vec<QA> = Vec::new();
    let mut served_per_round = Vec::new();

    loop {
        let batch = next_questions_with_rng(&basics, &history, &mut rng).expect("valid basics");
        if batch.is_complete() {
            break;
        }
        served_per_round.push(batch.questions.len());
        history.push(QA::new(batch.questions[0].clone(), "Loudly, in front of others."));
    }

    assert_eq!(served_per_round, vec![2, 2, 1]);
    assert_eq!(history.len(), 3);
}

#[test]
fn weapon_mentions_always_lead_with_law_enforcement() {
    let narratives = [
        "A coworker brought a knife to the break room",
        "He said he keeps a gun in his truck and laughed",
        "Argument escalated and she waved a weapon",
        "Minor disagreement, but a firearm was seen in a locker",
    ];
    for narrative in narratives {
        let basics = basics(narrative, &["Pat", "Lee"]);
        let assessed = score(&basics.what_happened, &[], &basics.involved_parties);
        let steps = plan(&assessed, &basics.what_happened, &[]);
        assert!(
            steps[0].starts_with(LAW_ENFORCEMENT_PREFIX),
            "{narrative} led with {}",
            steps[0]
        );
        assert!(steps.len() <= MAX_NEXT_STEPS);
    }
}

#[test]
fn total_score_matches_risk_tier() {
    let narratives = [
        "Two colleagues disagreed about parking",
        "Manager cut her hours after she complained about overtime",
        "The CEO fired an employee after she reported racial harassment, and others say it is widespread",
    ];
    for narrative in narratives {
        let assessed = score(narrative, &[], &["A".to_string(), "B".to_string()]);
        assert!(assessed.total_score <= 100);
        assert_eq!(
            assessed.risk_level,
            RiskLevel::from_total(assessed.total_score)
        );
        assert_eq!(assessed.factors.len(), 7);
    }
}

#[test]
fn categorization_is_positional() {
    let four = categorize(&["Ana", "Ben", "Cy", "Di"]);
    assert_eq!(four.complainants.len(), 1);
    assert_eq!(four.accused_subjects.len(), 1);
    assert_eq!(four.witnesses.len(), 2);
    assert_eq!(four.witnesses[1].name, "Di");

    let single = categorize(&["Ana"]);
    assert_eq!(single.complainants.len(), 1);
    assert!(single.accused_subjects.is_empty());

    let none: [&str; 0] = [];
    assert!(categorize(&none).is_empty());
}

#[test]
fn generated_questions_never_touch_blocked_topics() {
    let basics = basics(
        "Colleague shouted at a customer and pushed a cart into him",
        &["Jo", "Max"],
    );
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let batch = next_questions_with_rng(&basics, &[], &mut rng).expect("valid basics");
        assert!(batch.questions.iter().all(|q| is_permitted_question(q)));
    }
}

#[test]
fn markdown_export_keeps_fixed_section_order() {
    let basics = basics("Team lead yelled at a new hire during inventory", &["Kim", "Lou"]);
    let report = assemble(&basics, &[]).expect("report assembles");
    let markdown = render_markdown(&report);
    let headings = section_headings(&markdown);

    assert_eq!(
        &headings[..7],
        &[
            "Summary",
            "Detailed Account",
            "Involved Parties",
            "Risk Assessment",
            "Next Steps",
            "Company Communication",
            "Personalized Messages",
        ]
    );
    assert!(headings.contains(&"Evidence".to_string()));
    assert_eq!(render_markdown(&report), markdown);
}
