use crate::dom::{ElementId, ImageSrc};
use std::str::FromStr;
use strum::EnumString;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    #[strum(serialize = "Escape", serialize = "Esc")]
    Escape,
    Enter,
    #[strum(serialize = " ", serialize = "Space", serialize = "Spacebar")]
    Space,
    Tab,
    #[strum(disabled)]
    Other(String),
}

impl Key {
    /// Named keys by their DOM name; anything else is kept verbatim.
    pub fn named(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| Key::Other(name.to_string()))
    }
}

/// Operations the page markup invokes directly.
#[derive(Debug, Clone, PartialEq)]
pub enum PageCall {
    OpenModal(ImageSrc),
    CloseModal,
    ToggleFaq(ElementId),
    MoveTestimonial(i64),
    Book(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    DomReady,
    Load,
    Unload,
    Click(ElementId),
    PointerEnter(ElementId),
    PointerLeave(ElementId),
    Focus(ElementId),
    KeyDown { key: Key, shift: bool },
    TouchStart { target: ElementId, x: f64 },
    TouchMove { x: f64 },
    TouchEnd,
    Scroll(f64),
    Resize { width: f64, height: Option<f64> },
    Call(PageCall),
    Status,
    ConfigReload,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unbalanced quoting in '{0}'")]
    Quoting(String),
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Missing argument <{arg}> for '{command}'")]
    MissingArgument { command: String, arg: &'static str },
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}

fn number<T: FromStr>(value: &str) -> Result<T, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::InvalidNumber(value.to_string()))
}

/// Parses one line of the daemon protocol, e.g. `click hamburger` or
/// `book "Teeth Whitening"`.
impl FromStr for AppEvent {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = shell_words::split(line).map_err(|_| CommandError::Quoting(line.to_string()))?;
        let (command, args) = words.split_first().ok_or(CommandError::Empty)?;

        let arg = |i: usize, name: &'static str| {
            args.get(i)
                .map(String::as_str)
                .ok_or_else(|| CommandError::MissingArgument {
                    command: command.clone(),
                    arg: name,
                })
        };

        let event = match command.to_ascii_lowercase().as_str() {
            "ready" => AppEvent::DomReady,
            "load" => AppEvent::Load,
            "unload" => AppEvent::Unload,
            "click" => AppEvent::Click(ElementId::new(arg(0, "id")?)),
            "enter" => AppEvent::PointerEnter(ElementId::new(arg(0, "id")?)),
            "leave" => AppEvent::PointerLeave(ElementId::new(arg(0, "id")?)),
            "focus" => AppEvent::Focus(ElementId::new(arg(0, "id")?)),
            "key" => AppEvent::KeyDown {
                key: Key::named(arg(0, "key")?),
                shift: args.get(1).is_some_and(|m| m.eq_ignore_ascii_case("shift")),
            },
            "touchstart" => AppEvent::TouchStart {
                target: ElementId::new(arg(0, "id")?),
                x: number(arg(1, "x")?)?,
            },
            "touchmove" => AppEvent::TouchMove {
                x: number(arg(0, "x")?)?,
            },
            "touchend" => AppEvent::TouchEnd,
            "scroll" => AppEvent::Scroll(number(arg(0, "y")?)?),
            "resize" => AppEvent::Resize {
                width: number(arg(0, "width")?)?,
                height: args.get(1).map(|h| number(h)).transpose()?,
            },
            "open-modal" => AppEvent::Call(PageCall::OpenModal(ImageSrc::new(arg(0, "src")?))),
            "close-modal" => AppEvent::Call(PageCall::CloseModal),
            "faq" => AppEvent::Call(PageCall::ToggleFaq(ElementId::new(arg(0, "id")?))),
            "testimonial" => AppEvent::Call(PageCall::MoveTestimonial(number(arg(0, "dir")?)?)),
            "book" => AppEvent::Call(PageCall::Book(args.first().cloned())),
            "status" => AppEvent::Status,
            "reload" => AppEvent::ConfigReload,
            _ => return Err(CommandError::Unknown(command.clone())),
        };

        Ok(event)
    }
}
