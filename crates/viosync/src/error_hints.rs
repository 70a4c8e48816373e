use std::fmt::Write as _;

use anyhow::Error;

/// A hint group, shown when any of its needles occurs in the lowercased error chain.
struct Rule {
    needles: &'static [&'static str],
    hints: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        needles: &["no configuration file found"],
        hints: &[
            "Create one with `viosync init`, then fill in your values.",
            "Or point at an existing file with `--config <PATH>`.",
        ],
    },
    Rule {
        needles: &["is not set"],
        hints: &["Export TIDELIFT_API_KEY, JIRA_EMAIL and JIRA_TOKEN, or put them in a `.env` file."],
    },
    Rule {
        needles: &["unique_key_parts"],
        hints: &[
            "List at least one violation field under `[tidelift] unique_key_parts`, e.g. [\"package_name\"].",
        ],
    },
    Rule {
        needles: &["not found in the remote jira issue fields list"],
        hints: &["Check `[jira] unique_field_name` against the custom field's display name in Jira."],
    },
    Rule {
        needles: &["communicating with tidelift"],
        hints: &["Verify TIDELIFT_API_KEY and `[tidelift] organization` / `catalog`."],
    },
    Rule {
        needles: &["communicating with jira"],
        hints: &[
            "Verify JIRA_EMAIL / JIRA_TOKEN and that the account can create issues in the project.",
        ],
    },
    Rule {
        needles: &["missing key field", "cannot identify an issue"],
        hints: &[
            "Inspect the report with `viosync preview --format json` and adjust `unique_key_parts`.",
        ],
    },
    Rule {
        needles: &["failed to parse configuration"],
        hints: &["Check `viosync.toml` syntax and key names, or compare with `viosync init --print`."],
    },
];

/// Renders `err` with its context chain, followed by any matching hints.
pub(crate) fn format(err: &Error) -> String {
    let mut rendered = format!("Error: {err:#}");
    let hints = suggestions(err);
    if hints.is_empty() {
        return rendered;
    }
    rendered.push_str("\n\nHints:\n");
    for hint in hints {
        let _ = writeln!(rendered, "- {hint}");
    }
    rendered
}

fn suggestions(err: &Error) -> Vec<&'static str> {
    let chain = err
        .chain()
        .map(|cause| cause.to_string().to_ascii_lowercase())
        .collect::<Vec<_>>();
    let mentions = |needle: &str| chain.iter().any(|cause| cause.contains(needle));

    let mut picked: Vec<&'static str> = Vec::new();
    for rule in RULES.iter().filter(|rule| rule.needles.iter().any(|n| mentions(n))) {
        for &hint in rule.hints {
            if !picked.contains(&hint) {
                picked.push(hint);
            }
        }
    }
    picked
}
