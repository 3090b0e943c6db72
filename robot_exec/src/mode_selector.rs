//! # Mode selector
//!
//! Maps the operator state reported by the driver station onto the mode which should be current.

use comms_if::ds::{LifecycleEvent, OperatorState};
use crate::driver_station::LifecycleObserver;
use crate::modes::ModeId;

/// The mode which runs in the given operator state.
///
/// The test phase reuses the teleoperated mode.
pub fn mode_for(state: OperatorState) -> ModeId {
    match state {
        OperatorState::Disabled => ModeId::Disabled,
        OperatorState::Autonomous => ModeId::Autonomous,
        OperatorState::Teleoperated => ModeId::Teleoperated,
        OperatorState::Test => ModeId::Teleoperated
    }
}

/// Select the mode for the given operator state, reporting the state to the observer.
pub fn desired_mode<O>(state: OperatorState, observer: &mut O) -> ModeId
where
    O: LifecycleObserver + ?Sized
{
    observer.observe(LifecycleEvent::from(state));
    mode_for(state)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_desired_mode() {
        let mut events: Vec<LifecycleEvent> = Vec::new();

        assert_eq!(desired_mode(OperatorState::Disabled, &mut events), ModeId::Disabled);
        assert_eq!(desired_mode(OperatorState::Autonomous, &mut events), ModeId::Autonomous);
        assert_eq!(
            desired_mode(OperatorState::Teleoperated, &mut events),
            ModeId::Teleoperated
        );
        assert_eq!(desired_mode(OperatorState::Test, &mut events), ModeId::Teleoperated);

        assert_eq!(
            mode_for(OperatorState::Test),
            mode_for(OperatorState::Teleoperated)
        );

        // One event per selection
        assert_eq!(events, vec![
            LifecycleEvent::Disabled,
            LifecycleEvent::Autonomous,
            LifecycleEvent::Teleop,
            LifecycleEvent::Test,
        ]);
    }
}
