use std::sync::Arc;
use std::time::Duration;

use rfblinds_api::models::{CoveringConfig, CoveringStatus, MAX_POSITION, MotionState};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::errors::CoveringError;
use crate::services::TransmitterService;

#[derive(Debug)]
struct CoveringState {
    current_position: u8,
    target_position: u8,
    motion_state: MotionState,
    registered: bool,
    /// Stop task of the most recent move
    pending_stop: Option<JoinHandle<()>>,
    /// Incremented on every move so a stop task can tell whether it is the latest
    move_id: u64,
    updated_at: OffsetDateTime,
}

impl CoveringState {
    fn closed() -> Self {
        Self {
            current_position: 0,
            target_position: 0,
            motion_state: MotionState::Stopped,
            registered: false,
            pending_stop: None,
            move_id: 0,
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}

/// Position state machine of one RF covering.
///
/// A move transmits the open or close code, then a background task waits for
/// the travel time and transmits the stop code. The current position only
/// changes when that stop has been sent.
#[derive(Clone)]
pub struct CoveringController {
    config: Arc<CoveringConfig>,
    state: Arc<Mutex<CoveringState>>,
    transmitter: Arc<TransmitterService>,
}

impl CoveringController {
    /// Creates a stopped, fully closed covering
    pub fn new(config: CoveringConfig, transmitter: Arc<TransmitterService>) -> Self {
        Self {
            config: Arc::new(config),
            state: Arc::new(Mutex::new(CoveringState::closed())),
            transmitter,
        }
    }

    pub fn config(&self) -> &CoveringConfig {
        &self.config
    }

    pub fn serial_number(&self) -> &str {
        &self.config.serial_number
    }

    pub async fn get_current_position(&self) -> u8 {
        let position = self.state.lock().await.current_position;
        tracing::debug!("{} current position = {}", self.config.name, position);
        position
    }

    pub async fn get_target_position(&self) -> u8 {
        let position = self.state.lock().await.target_position;
        tracing::debug!("{} target position = {}", self.config.name, position);
        position
    }

    pub async fn get_motion_state(&self) -> MotionState {
        let motion_state = self.state.lock().await.motion_state;
        tracing::debug!("{} motion state = {}", self.config.name, motion_state);
        motion_state
    }

    pub async fn status(&self) -> CoveringStatus {
        let state = self.state.lock().await;

        CoveringStatus {
            serial_number: self.config.serial_number.clone(),
            name: self.config.name.clone(),
            current_position: state.current_position,
            target_position: state.target_position,
            motion_state: state.motion_state,
            registered: state.registered,
            updated_at: state.updated_at,
        }
    }

    pub async fn is_registered(&self) -> bool {
        self.state.lock().await.registered
    }

    pub async fn set_registered(&self, registered: bool) {
        let mut state = self.state.lock().await;
        state.registered = registered;
        state.touch();
    }

    pub async fn has_pending_stop(&self) -> bool {
        self.state
            .lock()
            .await
            .pending_stop
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn identify(&self) {
        tracing::info!(
            "Identify {} ({} {}, serial {})",
            self.config.name,
            self.config.manufacturer,
            self.config.model,
            self.config.serial_number
        );
    }

    /// Starts moving towards `position` and returns once the open or close code
    /// has been sent. Completion happens in the background.
    ///
    /// A command that arrives while a previous move is still pending does not
    /// cancel that move's stop; both stops fire and the last one to run decides
    /// the final position. Once the command is being sent, dropping the returned
    /// future does not abort the move.
    pub async fn set_target_position(&self, position: i32) -> Result<(), CoveringError> {
        let target = validate_position(position)?;

        tracing::info!("{} set target position to {}", self.config.name, target);

        let current = {
            let mut state = self.state.lock().await;
            if state.current_position == target {
                state.target_position = target;
                state.touch();
                return Ok(());
            }
            state.current_position
        };

        // Once the command is handed to the transmitter its stop must be scheduled,
        // even if the caller stops waiting.
        let controller = self.clone();
        tokio::spawn(async move { controller.start_move(current, target).await })
            .await
            .unwrap_or_else(|e| {
                tracing::error!("{} move to {} aborted: {}", self.config.name, target, e);
                Err(rfblinds_embedded::Error::TransmitFailure.into())
            })
    }

    async fn start_move(&self, current: u8, target: u8) -> Result<(), CoveringError> {
        let (motion_state, code) = if target > current {
            (MotionState::Increasing, self.config.open_code)
        } else {
            (MotionState::Decreasing, self.config.close_code)
        };
        let duration = self.travel_duration(current, target);

        if let Err(e) = self.transmitter.transmit(code).await {
            tracing::error!(
                "{} failed to transmit {} command: {}",
                self.config.name,
                motion_state,
                e
            );
            return Err(e.into());
        }

        let mut state = self.state.lock().await;
        state.target_position = target;
        state.motion_state = motion_state;
        state.move_id += 1;
        state.touch();

        tracing::debug!(
            "{} moving {} from {} to {}, stopping in {:?}",
            self.config.name,
            motion_state,
            current,
            target,
            duration
        );

        let handle = tokio::spawn(finish_move(
            self.config.name.clone(),
            self.config.stop_code,
            duration,
            state.move_id,
            self.state.clone(),
            self.transmitter.clone(),
        ));

        // Dropping an older handle detaches its task, it still runs to completion.
        state.pending_stop = Some(handle);

        Ok(())
    }

    /// Time to travel between two positions, proportional to the full travel time.
    pub fn travel_duration(&self, from: u8, to: u8) -> Duration {
        let distance = u64::from(from.abs_diff(to));
        let micros = self
            .config
            .full_travel_time_ms
            .saturating_mul(1_000)
            .saturating_mul(distance)
            / u64::from(MAX_POSITION);

        Duration::from_micros(micros)
    }
}

fn validate_position(position: i32) -> Result<u8, CoveringError> {
    u8::try_from(position)
        .ok()
        .filter(|position| *position <= MAX_POSITION)
        .ok_or(CoveringError::InvalidPosition(position))
}

async fn finish_move(
    name: String,
    stop_code: u64,
    duration: Duration,
    move_id: u64,
    state: Arc<Mutex<CoveringState>>,
    transmitter: Arc<TransmitterService>,
) {
    tokio::time::sleep(duration).await;

    let result = transmitter.transmit(stop_code).await;

    let mut state = state.lock().await;
    if state.move_id == move_id {
        state.pending_stop = None;
    }

    match result {
        Ok(()) => {
            state.current_position = state.target_position;
            state.motion_state = MotionState::Stopped;
            state.touch();

            tracing::info!("{} stopped at {}", name, state.current_position);
        }
        Err(e) => {
            tracing::error!(
                "{} failed to transmit stop code, still {}: {}",
                name,
                state.motion_state,
                e
            );
        }
    }
}
