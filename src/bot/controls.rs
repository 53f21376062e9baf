//! Persistent interactive controls.
//!
//! Three control templates exist: start-confession, reply-to-confession, and
//! reply-within-thread. A control's custom id encodes only its template and,
//! for the reply templates, the chain root's sequence number; every other
//! identifier (thread, anchor message) is resolved from the store when the
//! click arrives. Because nothing is captured in process memory, controls on
//! messages sent before the last restart keep working.

use serenity::all::{
    ActionRowComponent, ButtonStyle, CreateActionRow, CreateButton, CreateInputText, CreateModal,
    InputTextStyle, ModalInteraction,
};

const START_ID: &str = "confession:start";
const REPLY_PREFIX: &str = "confession:reply:";
const THREAD_REPLY_PREFIX: &str = "confession:thread_reply:";

const MODAL_NEW_ID: &str = "confession:modal:new";
const MODAL_REPLY_PREFIX: &str = "confession:modal:reply:";

/// Custom id of the modal text input carrying the submission body.
const BODY_INPUT_ID: &str = "body";

/// A parsed persistent control custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistentControl {
    /// Start a new confession (starter message and confession messages alike).
    StartConfession,
    /// Reply to the confession chain rooted at the given sequence number.
    ReplyToConfession { root_sequence: i64 },
    /// Reply from inside a thread; also carries the chain root.
    ThreadReply { root_sequence: i64 },
}

impl PersistentControl {
    /// Parses a component custom id into a control, if it is one of ours.
    pub fn parse(custom_id: &str) -> Option<Self> {
        if custom_id == START_ID {
            return Some(Self::StartConfession);
        }
        if let Some(rest) = custom_id.strip_prefix(REPLY_PREFIX) {
            return rest
                .parse()
                .ok()
                .map(|root_sequence| Self::ReplyToConfession { root_sequence });
        }
        if let Some(rest) = custom_id.strip_prefix(THREAD_REPLY_PREFIX) {
            return rest
                .parse()
                .ok()
                .map(|root_sequence| Self::ThreadReply { root_sequence });
        }

        None
    }

    /// Encodes the control back into its custom id.
    pub fn custom_id(&self) -> String {
        match self {
            Self::StartConfession => START_ID.to_string(),
            Self::ReplyToConfession { root_sequence } => {
                format!("{}{}", REPLY_PREFIX, root_sequence)
            }
            Self::ThreadReply { root_sequence } => {
                format!("{}{}", THREAD_REPLY_PREFIX, root_sequence)
            }
        }
    }
}

/// A parsed confession modal custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfessionModalKind {
    /// Submitting a new confession.
    New,
    /// Submitting a reply to the chain rooted at the given sequence number.
    Reply { root_sequence: i64 },
}

impl ConfessionModalKind {
    /// Parses a modal custom id, if it is one of ours.
    pub fn parse(custom_id: &str) -> Option<Self> {
        if custom_id == MODAL_NEW_ID {
            return Some(Self::New);
        }
        if let Some(rest) = custom_id.strip_prefix(MODAL_REPLY_PREFIX) {
            return rest
                .parse()
                .ok()
                .map(|root_sequence| Self::Reply { root_sequence });
        }

        None
    }

    /// Encodes the modal kind back into its custom id.
    pub fn custom_id(&self) -> String {
        match self {
            Self::New => MODAL_NEW_ID.to_string(),
            Self::Reply { root_sequence } => format!("{}{}", MODAL_REPLY_PREFIX, root_sequence),
        }
    }
}

/// Button row for the standing starter message.
pub fn starter_row() -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(START_ID)
        .label("Confess")
        .style(ButtonStyle::Primary)
        .emoji('📨')])
}

/// Button row attached to each published confession message.
pub fn confession_message_row(root_sequence: i64) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(START_ID)
            .label("Confess")
            .style(ButtonStyle::Primary)
            .emoji('📨'),
        CreateButton::new(
            PersistentControl::ReplyToConfession { root_sequence }.custom_id(),
        )
        .label("Reply")
        .style(ButtonStyle::Secondary)
        .emoji('💬'),
    ])
}

/// Button row attached to each reply message inside a thread.
pub fn thread_reply_row(root_sequence: i64) -> CreateActionRow {
    CreateActionRow::Buttons(vec![CreateButton::new(
        PersistentControl::ThreadReply { root_sequence }.custom_id(),
    )
    .label("Reply")
    .style(ButtonStyle::Secondary)
    .emoji('↩')])
}

/// Modal shown when a start-confession control is clicked.
pub fn new_confession_modal() -> CreateModal {
    CreateModal::new(MODAL_NEW_ID, "Send Anonymous Confession").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Paragraph, "Your Confession", BODY_INPUT_ID)
                .placeholder("Type your confession here...")
                .max_length(2000)
                .required(true),
        ),
    ])
}

/// Modal shown when a reply control is clicked.
pub fn reply_modal(root_sequence: i64) -> CreateModal {
    CreateModal::new(
        ConfessionModalKind::Reply { root_sequence }.custom_id(),
        "Reply to Confession",
    )
    .components(vec![CreateActionRow::InputText(
        CreateInputText::new(InputTextStyle::Paragraph, "Your Reply", BODY_INPUT_ID)
            .placeholder("Type your reply here...")
            .max_length(2000)
            .required(true),
    )])
}

/// Extracts the submission body from a submitted confession modal.
pub fn modal_body(interaction: &ModalInteraction) -> Option<String> {
    for row in &interaction.data.components {
        for component in &row.components {
            if let ActionRowComponent::InputText(input) = component {
                if input.custom_id == BODY_INPUT_ID {
                    return input.value.clone();
                }
            }
        }
    }

    None
}
