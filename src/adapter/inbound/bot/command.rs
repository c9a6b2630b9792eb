//! Telegram command parsing.

/// Supported chat commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    List,
    Settings,
}

/// Parse error for command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

/// Parse a chat message into a bot command.
pub fn parse_command(text: &str) -> Result<BotCommand, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(BotCommand::Start),
        "/help" => Ok(BotCommand::Help),
        "/list" => Ok(BotCommand::List),
        "/settings" => Ok(BotCommand::Settings),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "Кидай ссылку на товар с Ozon или Wildberries — начну отслеживать цену.\n\n\
    /list — список + отписка\n\
    /settings — выбрать интервал проверки (3/6/9/12 ч)"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("list", "Отслеживаемые товары"),
        ("settings", "Интервал проверки цен"),
        ("help", "Справка"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Basic command parsing
    // -------------------------------------------------------------------------

    #[test]
    fn parse_all_commands() {
        assert_eq!(parse_command("/start").unwrap(), BotCommand::Start);
        assert_eq!(parse_command("/help").unwrap(), BotCommand::Help);
        assert_eq!(parse_command("/list").unwrap(), BotCommand::List);
        assert_eq!(parse_command("/settings").unwrap(), BotCommand::Settings);
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(
            parse_command("/list@pricewatch_bot").unwrap(),
            BotCommand::List
        );
    }

    #[test]
    fn parse_command_with_leading_whitespace() {
        assert_eq!(parse_command("  /settings").unwrap(), BotCommand::Settings);
    }

    // -------------------------------------------------------------------------
    // Error cases
    // -------------------------------------------------------------------------

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(
            parse_command("привет"),
            Err(CommandParseError::NotACommand)
        );
        assert_eq!(parse_command(""), Err(CommandParseError::NotACommand));
        assert_eq!(parse_command("   "), Err(CommandParseError::NotACommand));
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse_command("/unknown").unwrap_err();
        assert!(matches!(err, CommandParseError::UnknownCommand(ref cmd) if cmd == "/unknown"));
    }

    #[test]
    fn commands_are_case_sensitive() {
        assert!(matches!(
            parse_command("/List"),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    // -------------------------------------------------------------------------
    // Menu registration
    // -------------------------------------------------------------------------

    #[test]
    fn bot_commands_have_descriptions() {
        for (cmd, desc) in bot_commands() {
            assert!(!cmd.is_empty());
            assert!(!desc.is_empty(), "empty description for {cmd}");
        }
    }

    #[test]
    fn help_mentions_both_marketplaces() {
        let help = command_help();
        assert!(help.contains("Ozon"));
        assert!(help.contains("Wildberries"));
        assert!(help.contains("/list"));
        assert!(help.contains("/settings"));
    }
}
