//! Static text for the welcome script and the landing page.

use std::fmt::Write as _;

pub const LANDING_TITLE: &str = "Web App Example";
pub const LANDING_SUBTITLE: &str = "Workflow toolkit with GitHub Integration";

pub const FEATURES: [&str; 5] = [
    "GitHub issue integration",
    "Development workflow commands",
    "Auto checkpoints",
    "Custom hooks (commit validation)",
    "Session logging",
];

pub const QUICK_START: [&str; 4] = [
    "workflow /github/start-from-issue <number>",
    "workflow /workflow/create-plan \"feature name\"",
    "workflow /dev/local-review",
    "workflow /github/describe-pr",
];

pub const WORKFLOW_COMMANDS: [(&str, &str); 3] = [
    ("/workflow/init", "Initialize workflow structure"),
    ("/workflow/create-plan", "Create a task plan"),
    ("/workflow/checkpoint", "Save your progress"),
];

/// Lines printed by the `welcome` command.
#[must_use]
pub fn welcome() -> Vec<String> {
    let mut lines = vec![
        "Welcome to the workflow toolkit!".to_string(),
        "This is a basic example project.".to_string(),
        String::new(),
        "Try these commands:".to_string(),
    ];

    lines.extend(
        WORKFLOW_COMMANDS
            .iter()
            .map(|(command, help)| format!("  {command:<23} - {help}")),
    );

    lines
}

/// Landing page rendered as terminal text.
#[must_use]
pub fn landing_text() -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{LANDING_TITLE}");
    let _ = writeln!(out, "{LANDING_SUBTITLE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Features Demonstrated:");
    for feature in FEATURES {
        let _ = writeln!(out, "  ✅ {feature}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Quick Start:");
    for command in QUICK_START {
        let _ = writeln!(out, "  {command}");
    }

    out
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Landing page rendered as a standalone HTML document.
#[must_use]
pub fn landing_html() -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n<div class=\"App\">\n<header class=\"App-header\">\n<h1>{}</h1>\n<p>{}</p>\n",
        escape_html(LANDING_TITLE),
        escape_html(LANDING_TITLE),
        escape_html(LANDING_SUBTITLE),
    );

    out.push_str("<div class=\"features\">\n<h2>Features Demonstrated:</h2>\n<ul>\n");
    for feature in FEATURES {
        let _ = writeln!(out, "<li>✅ {}</li>", escape_html(feature));
    }
    out.push_str("</ul>\n</div>\n");

    out.push_str("<div class=\"quick-start\">\n<h2>Quick Start:</h2>\n<pre>");
    let commands: Vec<String> = QUICK_START.iter().map(|c| escape_html(c)).collect();
    out.push_str(&commands.join("\n"));
    out.push_str("</pre>\n</div>\n</header>\n</div>\n</body>\n</html>\n");

    out
}
