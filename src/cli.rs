use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// The view selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Calendar { region: Option<String> },
    NextRace,
    DriverStandings,
    ConstructorStandings,
    Results { round: Option<u32> },
    Qualifying { round: u32 },
    Live { watch: bool },
}

/// Returns true when the arguments only touch configuration.
pub fn is_config_command(args: &Args) -> bool {
    args.list_config || args.new_log_file_path.is_some() || args.clear_log_file_path
}

/// Picks the view to print. The first view flag in this order wins; no view
/// flag means the home view.
pub fn selected_view(args: &Args) -> View {
    if args.calendar {
        View::Calendar {
            region: args.region.clone(),
        }
    } else if args.next {
        View::NextRace
    } else if args.standings {
        View::DriverStandings
    } else if args.constructors {
        View::ConstructorStandings
    } else if args.results {
        View::Results { round: args.round }
    } else if let Some(round) = args.qualifying {
        View::Qualifying { round }
    } else if args.live {
        View::Live { watch: args.watch }
    } else {
        View::Home
    }
}

/// Formula 1 race data in the terminal
///
/// Reads the season schedule, championship standings and race results from
/// the Jolpica API and live timing from OpenF1, and prints them as plain text
/// or JSON.
///
/// With no view flag the home view is shown: next race, last podium and the
/// top of the drivers' championship.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Show the home view (default)
    #[arg(long, help_heading = "Views")]
    pub home: bool,

    /// Show the season calendar with progress and the next race
    #[arg(long, short = 'c', help_heading = "Views")]
    pub calendar: bool,

    /// Only list races in this region (Europe, Middle East, Americas, Asia Pacific)
    #[arg(long, requires = "calendar", help_heading = "Views")]
    pub region: Option<String>,

    /// Show the next race of the season
    #[arg(long, short = 'n', help_heading = "Views")]
    pub next: bool,

    /// Show the drivers' championship
    #[arg(long, short = 's', help_heading = "Views")]
    pub standings: bool,

    /// Show the constructors' championship
    #[arg(long, help_heading = "Views")]
    pub constructors: bool,

    /// Show race results, for the last race unless --round is given
    #[arg(long, short = 'r', help_heading = "Views")]
    pub results: bool,

    /// Round of the current season for --results
    #[arg(long, requires = "results", value_name = "N", help_heading = "Views")]
    pub round: Option<u32>,

    /// Show qualifying results for a round of the current season
    #[arg(long, short = 'q', value_name = "N", help_heading = "Views")]
    pub qualifying: Option<u32>,

    /// Show the live timing board, or the demo board when no session is running
    #[arg(long, help_heading = "Views")]
    pub live: bool,

    /// Keep refreshing the live board until Ctrl-C
    #[arg(long, requires = "live", help_heading = "Views")]
    pub watch: bool,

    /// Print the view as JSON instead of text
    #[arg(long, help_heading = "Output")]
    pub json: bool,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("f1_race_data").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_default_view_is_home() {
        assert_eq!(selected_view(&parse(&[])), View::Home);
        assert_eq!(selected_view(&parse(&["--home"])), View::Home);
    }

    #[test]
    fn test_view_flags() {
        assert_eq!(
            selected_view(&parse(&["--calendar", "--region", "Europe"])),
            View::Calendar {
                region: Some("Europe".to_string())
            }
        );
        assert_eq!(
            selected_view(&parse(&["--results", "--round", "7"])),
            View::Results { round: Some(7) }
        );
        assert_eq!(
            selected_view(&parse(&["-q", "3"])),
            View::Qualifying { round: 3 }
        );
        assert_eq!(
            selected_view(&parse(&["--live", "--watch"])),
            View::Live { watch: true }
        );
        assert_eq!(selected_view(&parse(&["-s"])), View::DriverStandings);
    }

    #[test]
    fn test_dependent_flags_need_their_view() {
        let cmd = std::iter::once("f1_race_data");
        assert!(Args::try_parse_from(cmd.clone().chain(["--watch"])).is_err());
        assert!(Args::try_parse_from(cmd.clone().chain(["--round", "2"])).is_err());
        assert!(Args::try_parse_from(cmd.chain(["--region", "Europe"])).is_err());
    }

    #[test]
    fn test_config_commands() {
        assert!(is_config_command(&parse(&["--list-config"])));
        assert!(is_config_command(&parse(&["--clear-log-file"])));
        assert!(is_config_command(&parse(&["--set-log-file", "/tmp/f1.log"])));
        assert!(!is_config_command(&parse(&["--json"])));
    }
}
