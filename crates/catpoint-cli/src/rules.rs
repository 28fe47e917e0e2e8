//! # Rules Subcommand
//!
//! Prints the alarm transition table enforced by the security service.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

/// Arguments for the `catpoint rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Emit the table as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rule {
    /// Triggering event.
    pub event: &'static str,
    /// Condition that must hold.
    pub when: &'static str,
    /// Effect on the system.
    pub effect: &'static str,
}

/// The transition table, in evaluation order per event.
pub const RULES: &[Rule] = &[
    Rule {
        event: "sensor activated",
        when: "armed and NO_ALARM",
        effect: "PENDING_ALARM",
    },
    Rule {
        event: "sensor activated",
        when: "PENDING_ALARM",
        effect: "ALARM",
    },
    Rule {
        event: "sensor activated",
        when: "DISARMED",
        effect: "sensor updated only",
    },
    Rule {
        event: "sensor deactivated",
        when: "was active, PENDING_ALARM, no sensor left active",
        effect: "NO_ALARM",
    },
    Rule {
        event: "sensor deactivated",
        when: "was already inactive",
        effect: "unchanged",
    },
    Rule {
        event: "any sensor change",
        when: "ALARM",
        effect: "unchanged",
    },
    Rule {
        event: "arm DISARMED",
        when: "always",
        effect: "NO_ALARM",
    },
    Rule {
        event: "arm ARMED_HOME or ARMED_AWAY",
        when: "always",
        effect: "all sensors reset to inactive",
    },
    Rule {
        event: "arm ARMED_HOME",
        when: "last image showed a cat",
        effect: "ALARM",
    },
    Rule {
        event: "image with cat",
        when: "ARMED_HOME",
        effect: "ALARM",
    },
    Rule {
        event: "image without cat",
        when: "no sensor active",
        effect: "NO_ALARM",
    },
];

/// Execute the rules subcommand.
pub fn run_rules(args: &RulesArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, RULES)?;
        writeln!(out)?;
    } else {
        write_rules(&mut out)?;
    }
    Ok(0)
}

/// Render the table as aligned text.
pub fn write_rules(out: &mut impl Write) -> Result<()> {
    let event_width = RULES.iter().map(|r| r.event.len()).max().unwrap_or(0);
    let when_width = RULES.iter().map(|r| r.when.len()).max().unwrap_or(0);
    writeln!(
        out,
        "{:<event_width$}  {:<when_width$}  EFFECT",
        "EVENT", "WHEN"
    )?;
    for rule in RULES {
        writeln!(
            out,
            "{:<event_width$}  {:<when_width$}  {}",
            rule.event, rule.when, rule.effect
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_header_and_every_rule() {
        let mut buf = Vec::new();
        write_rules(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), RULES.len() + 1);
        assert!(text.starts_with("EVENT"));
        assert!(text.contains("last image showed a cat"));
    }

    #[test]
    fn test_rules_serialize() {
        let json = serde_json::to_value(RULES).unwrap();
        assert_eq!(json.as_array().unwrap().len(), RULES.len());
        assert_eq!(json[0]["effect"], "PENDING_ALARM");
    }
}
