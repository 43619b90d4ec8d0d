//! User-facing bot texts.
//!
//! Kept in one place so wording can change without touching dialogue logic.

/// Commands advertised to the chat platform's command menu.
pub const BOT_COMMANDS: &[(&str, &str)] = &[
    ("start", "Start working with the bot"),
    ("newstyle", "Create a new rewrite style"),
    ("liststyles", "Show all saved styles"),
    ("rewrite", "Rewrite text in a chosen style"),
    ("cancel", "Cancel the current dialogue"),
];

pub const GREETING: &str = "Hi! I'm a post-rewriting bot. Use /newstyle to create a new style, \
/liststyles to see saved styles, and /rewrite to rewrite text in one of them.";

pub const NOTHING_TO_CANCEL: &str = "There is nothing to cancel.";

// --- style creation ---

pub const ASK_PROMPT: &str =
    "Enter the system prompt for the AI (for example, 'Write in a business style, short and to the point').";

pub const ASK_EXAMPLE_FILE: &str = "Now send a .txt file with an example text for the style.";

pub const ONLY_TXT_FILES: &str = "Please send a file with the .txt extension.";

pub const ASK_STYLE_NAME: &str = "Enter a name for the style (for example, 'Business').";

pub const STYLE_NAME_AS_TEXT: &str = "Please send the style name as a text message.";

pub const INVALID_STYLE_NAME: &str =
    "The style name can't be empty or consist only of disallowed characters. Try again.";

pub const STYLE_NAME_TOO_LONG: &str =
    "That style name is too long for the style buttons. Please choose a shorter one.";

pub const MISSING_UPLOAD: &str = "No example file was received. Start again with /newstyle.";

pub const CREATION_CANCELLED: &str = "Style creation cancelled.";

// --- rewrite ---

pub const NO_STYLES: &str = "There are no saved styles yet. Create one with /newstyle.";

pub const CHOOSE_STYLE_FOR_REWRITE: &str = "Choose a style for the rewrite:";

pub const CHOOSE_STYLE_WITH_BUTTONS: &str = "Please choose a style using the buttons above.";

pub const STYLE_SELECTED: &str =
    "Style selected! Now send the text of the post (or forward the post) you want rewritten.";

pub const ASK_POST_TEXT: &str = "Please send the text to rewrite.";

pub const SELECTION_EXPIRED: &str =
    "This style selection is no longer active. Use /rewrite to start again.";

pub const PROMPT_MISSING: &str = "The prompt for this style was not found.";

pub const REWRITTEN_HEADER: &str = "Rewritten text:\n\n";

pub const REWRITE_CANCELLED: &str = "Rewrite cancelled.";

// --- browsing ---

pub const ALL_STYLES: &str = "Here are all your styles:";

pub const DELETE_BUTTON: &str = "Delete";

pub fn style_saved(name: &str) -> String {
    format!("Style '{name}' saved successfully!")
}

pub fn style_not_found(name: &str) -> String {
    format!("Style '{name}' not found.")
}

pub fn style_deleted(name: &str) -> String {
    format!("Style '{name}' deleted successfully.")
}

pub fn style_details(name: &str, prompt: &str) -> String {
    format!("Style: {name}\nPrompt: {prompt}")
}

pub fn file_save_failed(err: &dyn std::fmt::Display) -> String {
    format!("Error while saving the file: {err}")
}

pub fn style_save_failed(err: &dyn std::fmt::Display) -> String {
    format!("Error while saving the style: {err}")
}

pub fn style_read_failed(err: &dyn std::fmt::Display) -> String {
    format!("Error while reading style data: {err}")
}

pub fn style_delete_failed(err: &dyn std::fmt::Display) -> String {
    format!("Error while deleting the style: {err}")
}

pub fn style_list_failed(err: &dyn std::fmt::Display) -> String {
    format!("Error while listing styles: {err}")
}

pub fn rewrite_failed(err: &dyn std::fmt::Display) -> String {
    format!("Error while rewriting text: {err}")
}

/// `/help` text built from [`BOT_COMMANDS`].
pub fn command_menu() -> String {
    let lines: Vec<String> = BOT_COMMANDS
        .iter()
        .map(|(cmd, desc)| format!("/{cmd} - {desc}"))
        .collect();
    format!("Available commands:\n{}", lines.join("\n"))
}
