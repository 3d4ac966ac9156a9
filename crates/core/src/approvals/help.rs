const USAGE: [&str; 16] = [
    "⚠️ Invalid approval syntax. Here's how to use it:",
    "",
    "*Homelab opportunities:*",
    "  • `approve H1` (generates Technical Plan)",
    "",
    "*Work opportunities:*",
    "  • `approve W1 brief` (generates Leadership Brief)",
    "  • `approve W2 slide` (generates Client Slide)",
    "",
    "*Multiple approvals:*",
    "  • `approve H1, W1 brief, W2 slide`",
    "",
    "*Dismiss:*",
    "  • `dismiss H1` or `dismiss W2`",
    "",
    "*Errors detected:*",
];

/// Usage reply for a rejected approval message, echoing what went wrong.
pub fn help_message<S: AsRef<str>>(errors: &[S]) -> String {
    USAGE
        .iter()
        .map(|line| (*line).to_owned())
        .chain(errors.iter().map(|error| format!("  • {}", error.as_ref())))
        .collect::<Vec<_>>()
        .join("\n")
}
