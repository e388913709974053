//! CLI channel: stdin/stdout REPL that drives the live session.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{Result, WizardError};
use crate::script::content::{Block, Line, Tone};
use crate::script::objections::{OBJECTIONS, ObjectionId};
use crate::session::{SessionManager, SessionSnapshot, WizardAction};
use crate::wizard::branch::{BranchValue, SelectorId};
use crate::wizard::checklist::ChecklistKey;
use crate::wizard::progress::PhaseStatus;

const HELP: &str = "\
Commands:
  next | n              advance to the next step
  back | b              go back one step
  blind | warm          choose the transfer type (setup step)
  healthy | unhealthy   choose the health verdict (verdict step)
  check <item>          toggle a health question (meds, cancer, hospital, oxygen, tobacco)
  objection <n>         show objection handler n (1-4)
  close                 hide the objection handler
  copy <n>              print script card n for copying
  reset [--yes]         start a new call
  show                  redraw the current screen
  quit                  exit";

/// One parsed line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Action(WizardAction),
    Show,
    Help,
    Quit,
}

impl std::str::FromStr for CliCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Self::Show);
        };
        let arg = words.next();

        let action = match command.to_ascii_lowercase().as_str() {
            "next" | "n" => WizardAction::Advance,
            "back" | "b" => WizardAction::Retreat,
            "reset" => WizardAction::Reset {
                confirmed: matches!(arg, Some("--yes" | "-y")),
            },
            "blind" => select(SelectorId::TransferType, BranchValue::Blind),
            "warm" => select(SelectorId::TransferType, BranchValue::Warm),
            "healthy" => select(SelectorId::HealthVerdict, BranchValue::Healthy),
            "unhealthy" => select(SelectorId::HealthVerdict, BranchValue::Unhealthy),
            "check" => {
                let key = arg.ok_or("Usage: check <item>")?;
                WizardAction::Toggle {
                    key: key.parse::<ChecklistKey>().map_err(|e| e.to_string())?,
                }
            }
            "objection" | "o" => {
                let n = parse_position(arg, "objection <n>")?;
                let objection = ObjectionId::from_index(n)
                    .ok_or_else(|| WizardError::UnknownObjection((n + 1).to_string()).to_string())?;
                WizardAction::OpenObjection { objection }
            }
            "close" => WizardAction::CloseObjection,
            "copy" => WizardAction::CopyCard {
                index: parse_position(arg, "copy <n>")?,
            },
            "show" | "s" => return Ok(Self::Show),
            "help" | "?" => return Ok(Self::Help),
            "quit" | "exit" | "q" => return Ok(Self::Quit),
            other => return Err(format!("Unknown command: {other} (type 'help')")),
        };
        Ok(Self::Action(action))
    }
}

fn select(selector: SelectorId, value: BranchValue) -> WizardAction {
    WizardAction::Select { selector, value }
}

/// Parse a 1-based position into a 0-based index.
fn parse_position(arg: Option<&str>, usage: &str) -> std::result::Result<usize, String> {
    arg.and_then(|a| a.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .map(|n| n - 1)
        .ok_or_else(|| format!("Usage: {usage}"))
}

/// Render a snapshot as terminal text.
pub fn format_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = Vec::new();

    let phases: Vec<String> = snapshot
        .progress
        .phases
        .iter()
        .map(|p| match p.status {
            PhaseStatus::Done => format!("✓ {}", p.title),
            PhaseStatus::Current => format!("[{}]", p.title),
            PhaseStatus::Upcoming => p.title.to_string(),
        })
        .collect();
    out.push(phases.join("  "));
    out.push(format!("{} | {}", snapshot.phase.title, snapshot.progress.label));
    out.push(String::new());
    out.push(format!("== {} ==", snapshot.screen.heading));
    if let Some(sub) = snapshot.screen.subheading {
        out.push(sub.to_string());
    }

    let mut card_number = 0;
    for block in &snapshot.screen.blocks {
        out.push(String::new());
        match block {
            Block::Card(card) => {
                card_number += 1;
                let title = card.title.unwrap_or("Script");
                out.push(format!("{} #{card_number} {title}", tone_marker(card.tone)));
                for line in &card.lines {
                    out.push(match line {
                        Line::Say { text } => format!("  {text}"),
                        Line::Cue { text } => format!("  ~ {text}"),
                        Line::Emphasis { text } => format!("  ** {text}"),
                        Line::Bullet { lead: Some(lead), text } => format!("  - {lead} {text}"),
                        Line::Bullet { lead: None, text } => format!("  - {text}"),
                        Line::Option { label, text } => format!("  {label}\n    {text}"),
                    });
                }
            }
            Block::Choices { options, .. } => {
                for option in options {
                    out.push(format!("  [{}] {}: {}", option.value, option.label, option.hint));
                }
            }
            Block::Checklist { items } => {
                out.push("  You must ask these questions:".to_string());
                for item in items {
                    let mark = if snapshot.checklist.is_checked(item.key) { "x" } else { " " };
                    out.push(format!("  [{mark}] {:<8} {}", item.key.as_str(), item.question));
                }
            }
            Block::Notice { tone, label, text } => match label {
                Some(label) => out.push(format!("{} {label}: {text}", tone_marker(*tone))),
                None => out.push(format!("{} {text}", tone_marker(*tone))),
            },
        }
    }

    if let Some(objection) = &snapshot.active_objection {
        out.push(String::new());
        out.push(format!("── Objection: \"{}\" ──", objection.label));
        out.push(format!("  {}", objection.response));
    }

    out.push(String::new());
    let mut hints = Vec::new();
    if snapshot.controls.back_enabled {
        hints.push("back".to_string());
    }
    hints.push(format!("{} ({})", snapshot.controls.primary_label, primary_hint(snapshot)));
    out.push(hints.join(" | "));

    out.join("\n")
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Standard => "▪",
        Tone::Success => "✔",
        Tone::Warning => "!",
        Tone::Critical => "‼",
    }
}

fn primary_hint(snapshot: &SessionSnapshot) -> &'static str {
    use crate::wizard::progress::PrimaryControl;
    match snapshot.controls.primary {
        PrimaryControl::Next => "next",
        PrimaryControl::CompleteChecklist => "check all items first",
        PrimaryControl::Finish => "reset",
    }
}

/// Read commands from stdin until EOF or `quit`.
pub async fn run_cli(manager: Arc<SessionManager>) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    println!("{}\n", format_snapshot(&manager.snapshot().await));
    eprintln!("Objections: {}", objection_menu());
    eprint!("> ");

    while let Some(line) = lines.next_line().await? {
        match line.trim().parse::<CliCommand>() {
            Ok(CliCommand::Quit) => break,
            Ok(CliCommand::Help) => eprintln!("{HELP}"),
            Ok(CliCommand::Show) => println!("\n{}\n", format_snapshot(&manager.snapshot().await)),
            Ok(CliCommand::Action(action)) => match manager.apply_logged(action).await {
                Ok(applied) => match applied.clipboard {
                    Some(text) => println!("\n{text}\n"),
                    None => println!("\n{}\n", format_snapshot(&applied.snapshot)),
                },
                Err(WizardError::ConfirmationRequired) => {
                    eprint!("Are you sure you want to reset the call? [y/N] ");
                    let answer = lines.next_line().await?.unwrap_or_default();
                    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                        match manager.apply_logged(WizardAction::Reset { confirmed: true }).await {
                            Ok(applied) => println!("\n{}\n", format_snapshot(&applied.snapshot)),
                            Err(e) => eprintln!("{e}"),
                        }
                    }
                }
                Err(e) => eprintln!("{e}"),
            },
            Err(msg) => eprintln!("{msg}"),
        }
        eprint!("> ");
    }

    Ok(())
}

fn objection_menu() -> String {
    OBJECTIONS
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}) {}", i + 1, o.label))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Wizard;

    fn parse(s: &str) -> std::result::Result<CliCommand, String> {
        s.parse()
    }

    #[test]
    fn parses_navigation() {
        assert_eq!(parse("next").unwrap(), CliCommand::Action(WizardAction::Advance));
        assert_eq!(parse("B").unwrap(), CliCommand::Action(WizardAction::Retreat));
        assert_eq!(parse("").unwrap(), CliCommand::Show);
        assert_eq!(parse("quit").unwrap(), CliCommand::Quit);
    }

    #[test]
    fn parses_reset_confirmation_flag() {
        assert_eq!(
            parse("reset").unwrap(),
            CliCommand::Action(WizardAction::Reset { confirmed: false })
        );
        assert_eq!(
            parse("reset --yes").unwrap(),
            CliCommand::Action(WizardAction::Reset { confirmed: true })
        );
    }

    #[test]
    fn parses_branch_choices() {
        assert_eq!(
            parse("warm").unwrap(),
            CliCommand::Action(select(SelectorId::TransferType, BranchValue::Warm))
        );
        assert_eq!(
            parse("unhealthy").unwrap(),
            CliCommand::Action(select(SelectorId::HealthVerdict, BranchValue::Unhealthy))
        );
    }

    #[test]
    fn parses_checklist_and_positions() {
        assert_eq!(
            parse("check meds").unwrap(),
            CliCommand::Action(WizardAction::Toggle { key: ChecklistKey::Meds })
        );
        assert!(parse("check pets").unwrap_err().contains("pets"));
        assert!(parse("check").is_err());

        assert_eq!(
            parse("objection 1").unwrap(),
            CliCommand::Action(WizardAction::OpenObjection {
                objection: ObjectionId::TooExpensive
            })
        );
        assert!(parse("objection 5").is_err());
        assert!(parse("objection 0").is_err());
        assert_eq!(
            parse("copy 2").unwrap(),
            CliCommand::Action(WizardAction::CopyCard { index: 1 })
        );
    }

    #[test]
    fn unknown_command() {
        assert!(parse("dance").unwrap_err().starts_with("Unknown command"));
    }

    #[test]
    fn format_shows_checklist_state() {
        let mut wizard = Wizard::new();
        wizard.select(SelectorId::TransferType, BranchValue::Blind).unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.toggle(ChecklistKey::Cancer);
        wizard.open(ObjectionId::TalkToKids);

        let snap = SessionSnapshot::capture(&wizard);
        let text = format_snapshot(&snap);
        assert!(text.contains("== Health Discovery =="));
        assert!(text.contains("[x] cancer"));
        assert!(text.contains("[ ] meds"));
        assert!(text.contains("Step 5 of 12"));
        assert!(text.contains("Objection: \"I need to talk to my kids\""));
        assert!(text.contains("Complete Checklist"));
    }
}
