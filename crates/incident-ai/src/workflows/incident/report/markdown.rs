use super::IncidentReport;
use crate::workflows::incident::parties::PartyInfo;

pub const REPORT_TITLE: &str = "# Incident Report";
const FOOTER: &str = "_Generated by the incident assessment engine. Scores are risk signals, \
not legal determinations._";

/// Render the report as Markdown. Output depends only on the report, so two
/// identical reports always render byte-identical documents.
pub fn render_markdown(report: &IncidentReport) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");

    section(&mut out, "Summary", |out| {
        prose(out, &report.incident_summary);
        line(
            out,
            &format!(
                "\n**Risk Level:** {} | **Risk Type:** {}",
                report.risk_level.label(),
                report.risk_type.label()
            ),
        );
    });

    section(&mut out, "Detailed Account", |out| {
        prose(out, &report.detailed_account);
    });

    section(&mut out, "Involved Parties", |out| {
        party_group(out, "Complainants", &report.categorized_parties.complainants);
        party_group(
            out,
            "Accused/Subjects",
            &report.categorized_parties.accused_subjects,
        );
        party_group(out, "Witnesses", &report.categorized_parties.witnesses);
        line(out, &format!("_{}_", single_line(&report.categorization_note)));
    });

    section(&mut out, "Risk Assessment", |out| {
        let score = &report.incident_score;
        line(
            out,
            &format!(
                "**Total Score:** {}/100 ({})\n",
                score.total_score,
                score.risk_level.label()
            ),
        );
        line(out, "| Factor | Weight | Score | Weighted |");
        line(out, "| --- | --- | --- | --- |");
        for factor in &score.factors {
            line(
                out,
                &format!(
                    "| {} | {:.0}% | {}/5 | {:.1} |",
                    factor.factor.label(),
                    factor.weight * 100.0,
                    factor.score,
                    factor.weighted_score
                ),
            );
        }
        out.push('\n');
        prose(out, &score.explanation);
    });

    section(&mut out, "Next Steps", |out| {
        for (index, step) in report.recommended_next_steps.iter().enumerate() {
            line(out, &format!("{}. {}", index + 1, single_line(step)));
        }
    });

    section(&mut out, "Company Communication", |out| {
        line(
            out,
            &format!("**Subject:** {}\n", single_line(&report.company_message.subject)),
        );
        prose(out, &report.company_message.body);
    });

    section(&mut out, "Personalized Messages", |out| {
        for (name, message) in &report.personalized_messages {
            line(out, &format!("### {}\n", single_line(name)));
            line(out, &format!("**Subject:** {}\n", single_line(&message.subject)));
            prose(out, &message.body);
            out.push('\n');
        }
    });

    let policies = &report.policy_cross_check.policies_referenced;
    if !policies.is_empty() {
        section(&mut out, "Policy References", |out| {
            for policy in policies {
                line(
                    out,
                    &format!(
                        "- **{}** ({}): {}",
                        single_line(&policy.title),
                        single_line(&policy.section),
                        single_line(&policy.relevance)
                    ),
                );
            }
            line(
                out,
                &format!("\n_{}_", single_line(&report.policy_cross_check.notes)),
            );
        });
    }

    if let Some(violations) = &report.policy_violations {
        section(&mut out, "Policy Violations", |out| {
            for violation in violations {
                line(
                    out,
                    &format!(
                        "- **{}**: {}",
                        single_line(&violation.policy),
                        single_line(&violation.description)
                    ),
                );
            }
        });
    }

    if let Some(notes) = &report.defense_notes {
        section(&mut out, "Defense Notes", |out| bullets(out, notes));
    }

    if let Some(evidence) = &report.evidence {
        section(&mut out, "Evidence", |out| {
            for item in evidence {
                line(
                    out,
                    &format!(
                        "- [{}]({})",
                        single_line(&item.name),
                        single_line(item.url.trim())
                    ),
                );
            }
        });
    }

    if let Some(requirements) = &report.notification_requirements {
        section(&mut out, "Notification Requirements", |out| {
            bullets(out, requirements)
        });
    }

    out.push_str("---\n\n");
    out.push_str(FOOTER);
    out.push('\n');
    out
}

/// Level-two headings in document order.
pub fn section_headings(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .map(|heading| heading.trim().to_string())
        .collect()
}

fn section(out: &mut String, title: &str, body: impl FnOnce(&mut String)) {
    out.push_str(&format!("## {title}\n\n"));
    body(out);
    out.push('\n');
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

/// Free text from the reporter. Lines that would read as headings are escaped
/// so the section structure stays fixed.
fn prose(out: &mut String, text: &str) {
    for raw in text.lines() {
        if raw.trim_start().starts_with('#') {
            out.push('\\');
        }
        line(out, raw);
    }
}

/// Collapse line breaks so inline values cannot start a new block.
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        line(out, &format!("- {}", single_line(item)));
    }
}

fn party_group(out: &mut String, label: &str, parties: &[PartyInfo]) {
    if parties.is_empty() {
        line(out, &format!("**{label}:** none\n"));
        return;
    }
    line(out, &format!("**{label}:**"));
    for party in parties {
        line(
            out,
            &format!(
                "- {} ({}, {})",
                single_line(&party.name),
                party.role.label(),
                single_line(&party.relationship)
            ),
        );
    }
    out.push('\n');
}
