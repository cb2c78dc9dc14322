use chrono::NaiveDate;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::error::{Error, Result};
use crate::grid::MonthIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next(u32),
    Prev(u32),
    Today,
    Clear,
    Goto(NaiveDate),
    Quit,
}

fn count(input: &str) -> IResult<&str, u32> {
    map(
        opt(preceded(space1, map_res(digit1, u32::from_str))),
        |n| n.unwrap_or(1),
    )(input)
}

fn target(input: &str) -> IResult<&str, NaiveDate> {
    map_res(
        recognize(tuple((
            digit1,
            char('-'),
            digit1,
            opt(pair(char('-'), digit1)),
        ))),
        parse_target,
    )(input)
}

/// `YYYY-MM-DD` or `YYYY-MM`, the latter meaning the first of the month.
fn parse_target(s: &str) -> Result<NaiveDate> {
    if s.matches('-').count() == 2 {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    } else {
        Ok(MonthIndex::from_str(s)?.first_day())
    }
}

fn command(input: &str) -> IResult<&str, Command> {
    alt((
        map(preceded(tag("next"), count), Command::Next),
        map(preceded(tag("prev"), count), Command::Prev),
        value(Command::Today, tag("today")),
        value(Command::Clear, tag("clear")),
        map(preceded(pair(tag("goto"), space1), target), Command::Goto),
        value(Command::Quit, alt((tag("quit"), tag("q")))),
    ))(input)
}

pub fn parse_command(input: &str) -> Result<Command> {
    let (_, cmd) = all_consuming(delimited(space0, command, space0))(input).map_err(|e| {
        log::debug!("{:?}", e);
        Error::from(e).with_msg(&format!("unknown command '{}'", input.trim()))
    })?;
    Ok(cmd)
}

impl Command {
    pub fn run(self, context: &mut Context) {
        match self {
            Command::Next(n) => context.next_month(n),
            Command::Prev(n) => context.prev_month(n),
            Command::Today => context.goto_today(),
            Command::Clear => context.clear_selection(),
            Command::Goto(date) => context.goto(date),
            Command::Quit => context.request_quit(),
        }
    }
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, cmd: &str) -> Result<()> {
        let cmd = parse_command(cmd)?;
        log::debug!("Running {:?}", cmd);
        cmd.run(self.context);
        Ok(())
    }

    /// Runs the typed command line. On success the view returns to normal
    /// mode, otherwise the error is kept for the bottom bar.
    pub fn submit(&mut self) {
        let line = self.context.finish_line();
        match self.run_command(&line) {
            Ok(()) => {
                self.context.last_error_message = None;
                self.context.mode = Mode::Normal;
            }
            Err(e) => self.report_error(e),
        }
    }

    fn report_error(&mut self, error: Error) {
        log::warn!("{}", error);
        self.context.last_error_message = Some(format!("{}", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::agenda::Agenda;
    use crate::locale::Locale;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context() -> Context {
        Context::new(Agenda::default(), Locale::En).with_today(date(2026, 10, 18))
    }

    #[test]
    fn parses_navigation() {
        assert_eq!(parse_command("next").unwrap(), Command::Next(1));
        assert_eq!(parse_command("next 3").unwrap(), Command::Next(3));
        assert_eq!(parse_command("  prev 12 ").unwrap(), Command::Prev(12));
        assert_eq!(parse_command("today").unwrap(), Command::Today);
        assert_eq!(parse_command("clear").unwrap(), Command::Clear);
    }

    #[test]
    fn parses_quit_aliases() {
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn parses_goto() {
        assert_eq!(
            parse_command("goto 2027-02-14").unwrap(),
            Command::Goto(date(2027, 2, 14))
        );
        assert_eq!(
            parse_command("goto 2027-02").unwrap(),
            Command::Goto(date(2027, 2, 1))
        );
    }

    #[test]
    fn rejects_malformed() {
        let malformed = [
            "",
            "nxt",
            "next three",
            "next3",
            "goto",
            "goto 2027-13",
            "goto 2027-02-30",
        ];
        for cmd in &malformed {
            let err = parse_command(cmd).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::CommandParse), "{}", cmd);
        }
    }

    #[test]
    fn parse_failure_names_the_command() {
        let err = parse_command("  jump 3 ").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::CommandParse));
        assert_eq!(err.to_string(), "invalid command: unknown command 'jump 3'");
    }

    #[test]
    fn commands_drive_the_context() {
        let mut ctx = context();

        let mut parser = CommandParser::new(&mut ctx);
        parser.run_command("next 2").unwrap();
        parser.run_command("goto 2026-12-24").unwrap();
        assert!(parser.run_command("bogus").is_err());

        assert_eq!(ctx.current(), date(2026, 12, 24));
        assert!(!ctx.quit_requested());

        CommandParser::new(&mut ctx).run_command("q").unwrap();
        assert!(ctx.quit_requested());
    }

    #[test]
    fn submit_reports_errors_and_keeps_command_mode() {
        let mut ctx = context();
        ctx.mode = Mode::Command;

        ctx.command_line = "frobnicate".to_owned();
        CommandParser::new(&mut ctx).submit();
        assert_eq!(ctx.mode, Mode::Command);
        assert!(ctx.command_line.is_empty());
        assert!(ctx
            .last_error_message
            .as_deref()
            .unwrap()
            .contains("frobnicate"));

        ctx.command_line = "prev".to_owned();
        CommandParser::new(&mut ctx).submit();
        assert_eq!(ctx.mode, Mode::Normal);
        assert_eq!(ctx.last_error_message, None);
        assert_eq!(ctx.current(), date(2026, 9, 1));
    }
}
