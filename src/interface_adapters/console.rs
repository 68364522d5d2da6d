// Keyboard control source on stdin. Each key maps to exactly one helm action.

use crate::use_cases::{ControlAction, Helm, Lifecycle, LifecyclePhase};
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Control(ControlAction),
    Quit,
}

pub fn command_for_key(key: char) -> Option<ConsoleCommand> {
    let command = match key {
        '+' | '=' => ConsoleCommand::Control(ControlAction::IncreaseThrottle),
        '-' | '_' => ConsoleCommand::Control(ControlAction::DecreaseThrottle),
        'l' | 'L' => ConsoleCommand::Control(ControlAction::RudderLeft),
        'r' | 'R' => ConsoleCommand::Control(ControlAction::RudderRight),
        'q' | 'Q' => ConsoleCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Reads keys line by line until quit, shutdown or end of input.
pub fn run_console<R: BufRead>(input: R, helm: &Helm, lifecycle: &Lifecycle) {
    'lines: for line in input.lines() {
        let Ok(line) = line else { break };
        for key in line.chars().filter(|c| !c.is_whitespace()) {
            if lifecycle.phase() != LifecyclePhase::Running {
                break 'lines;
            }
            match command_for_key(key) {
                Some(ConsoleCommand::Control(action)) => {
                    if let Err(e) = helm.apply(action) {
                        warn!(?action, error = %e, "control rejected");
                        break 'lines;
                    }
                }
                Some(ConsoleCommand::Quit) => {
                    info!("quit requested from console");
                    lifecycle.request_shutdown();
                    break 'lines;
                }
                None => debug!(%key, "unmapped console key"),
            }
        }
    }
    debug!("console input closed");
}

/// Blocking stdin reads live on their own thread so they never hold up runtime shutdown.
pub fn spawn_console(helm: Arc<Helm>, lifecycle: Lifecycle) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("helm-console".to_string())
        .spawn(move || run_console(std::io::stdin().lock(), &helm, &lifecycle))?;
    info!("console controls: + / - throttle, l / r rudder, q quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SimTuning, VehicleState};
    use crate::use_cases::test_support::RecordingSink;
    use std::io::Cursor;

    fn helm() -> (Helm, Lifecycle) {
        let lifecycle = Lifecycle::new();
        let helm = Helm::new(
            Arc::new(VehicleState::new()),
            Arc::new(RecordingSink::new()),
            lifecycle.clone(),
            SimTuning::default(),
        );
        (helm, lifecycle)
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(
            command_for_key('+'),
            Some(ConsoleCommand::Control(ControlAction::IncreaseThrottle))
        );
        assert_eq!(command_for_key('Q'), Some(ConsoleCommand::Quit));
        assert_eq!(command_for_key('x'), None);
    }

    #[test]
    fn each_key_is_one_press() {
        let (helm, lifecycle) = helm();
        run_console(Cursor::new("+++\n-\nl l\nr\n"), &helm, &lifecycle);

        assert_eq!(helm.vehicle().rpm_setting(), 20.0);
        assert_eq!(helm.vehicle().rudder_angle(), 32.5);
        assert_eq!(lifecycle.phase(), LifecyclePhase::Running);
    }

    #[test]
    fn quit_stops_reading() {
        let (helm, lifecycle) = helm();
        run_console(Cursor::new("+\nq\n+++\n"), &helm, &lifecycle);

        assert_eq!(helm.vehicle().rpm_setting(), 10.0);
        assert_eq!(lifecycle.phase(), LifecyclePhase::Cancelling);
    }
}
