extern crate moncal as lib;

use chrono::Utc;
use flexi_logger::{FileSpec, Logger};
use lib::agenda::Agenda;
use lib::events::Dispatcher;
use lib::grid::MonthIndex;
use lib::ui::app::App;
use nix::sys::termios;
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;
use tui::backend::TermionBackend;
use tui::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(name = "moncal", about = "A month view calendar for the terminal.")]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "month", help = "month to start on, as YYYY-MM")]
    pub month: Option<MonthIndex>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    } else if !args.show {
        // Keep stderr clean while the alternate screen is up
        logger = logger.do_not_log();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let agenda = Agenda::from_config(&config)?;

    if args.show {
        let today = Utc::now().date_naive();
        let month = args.month.unwrap_or_else(|| MonthIndex::from(&today));
        let text = lib::print::render_month(&month, &today, &agenda, config.locale);
        io::stdout().write_all(text.as_bytes())?;
        return Ok(());
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("moncal ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let mut app = App::new(&config, agenda);
    if let Some(month) = args.month {
        app.show_month(month);
    }

    let dispatcher = Dispatcher::from_config(&config);

    let stdout = io::stdout().into_raw_mode()?;
    let stdout = AlternateScreen::from(stdout);
    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = app.run(dispatcher, &mut terminal);

    terminal.show_cursor()?;
    result
}
