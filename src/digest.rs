use crate::api::models::ParticipantStatus;
use crate::config::ReminderConfig;
use crate::constants;
use crate::pipeline::{PullRequestRecord, filter_reviewers};
use crate::slack::{Block, Text, WebhookMessage};

/// Assemble the Block Kit digest: one header section, then a section
/// plus divider per pull request record, in collection order.
pub fn render(cfg: &ReminderConfig, records: &[PullRequestRecord]) -> WebhookMessage {
    let mut blocks = Vec::with_capacity(1 + records.len() * 2);
    blocks.push(Block::Section {
        text: Text::Plain {
            text: constants::DIGEST_HEADER_TEXT.to_string(),
            emoji: true,
        },
    });

    for record in records {
        blocks.push(Block::Section {
            text: Text::Mrkdwn {
                text: render_record(cfg, record),
            },
        });
        blocks.push(Block::Divider);
    }

    WebhookMessage { blocks }
}

fn render_record(cfg: &ReminderConfig, record: &PullRequestRecord) -> String {
    format!(
        "*Project:* {} {}\n*Repository:* {}\n*<{}|{}>*\n*To review:* {}",
        record.project_name,
        record.project_key,
        record.repository_name,
        record.link(),
        record.title,
        pending_reviewers(cfg, record),
    )
}

/// Reviewers still on the hook: not excluded and not yet past the
/// unapproved state. Each name is followed by a single space.
fn pending_reviewers(cfg: &ReminderConfig, record: &PullRequestRecord) -> String {
    let mut names = String::new();
    for reviewer in filter_reviewers(&record.reviewers, &cfg.filter_reviewers) {
        if reviewer.status == ParticipantStatus::Unapproved {
            names.push_str(&reviewer.user.name);
            names.push(' ');
        }
    }
    names
}
