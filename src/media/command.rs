// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Player that runs an external program per clip.
//!
//! `command args... <uri>` is spawned for each clip and killed on stop.
//! State changes are the process lifecycle: spawned is READY, exited is
//! ENDED, killed is IDLE.

use std::collections::VecDeque;
use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

use crate::error::{QuizError, Result};
use crate::quiz::{MediaPlayer, PlaybackState};

/// External command player
#[derive(Debug)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
    /// Pending (play_when_ready, state) reports
    states: VecDeque<(bool, PlaybackState)>,
    released: bool,
}

impl CommandPlayer {
    /// Create a player for `program` with leading `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            child: None,
            states: VecDeque::new(),
            released: false,
        }
    }

    /// Program being run
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if a clip process is alive
    pub fn is_playing(&mut self) -> bool {
        self.reap();
        self.child.is_some()
    }

    /// Next state change since the last poll
    pub fn poll_state(&mut self) -> Option<(bool, PlaybackState)> {
        self.reap();
        self.states.pop_front()
    }

    fn reap(&mut self) {
        let exited = match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(Some(status)) => {
                    debug!(%status, "player process exited");
                    true
                }
                Ok(None) => false,
                Err(e) => {
                    warn!(error = %e, "failed to query player process");
                    false
                }
            },
            None => false,
        };
        if exited {
            self.child = None;
            self.states.push_back((false, PlaybackState::Ended));
        }
    }

    fn kill(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            // Already exited is fine
            let _ = child.kill();
            child
                .wait()
                .map_err(|e| QuizError::Media(format!("failed to reap player: {}", e)))?;
            self.states.push_back((false, PlaybackState::Idle));
        }
        Ok(())
    }
}

impl MediaPlayer for CommandPlayer {
    fn play(&mut self, uri: &str) -> Result<()> {
        if self.released {
            return Err(QuizError::Media("player already released".to_string()));
        }
        self.kill()?;

        self.states.push_back((true, PlaybackState::Buffering));
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(uri)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let child = match spawned {
            Ok(child) => child,
            Err(e) => {
                self.states.push_back((false, PlaybackState::Idle));
                return Err(QuizError::Media(format!(
                    "failed to start {:?}: {}",
                    self.program, e
                )));
            }
        };

        debug!(program = %self.program, uri, pid = child.id(), "player started");
        self.child = Some(child);
        self.states.push_back((true, PlaybackState::Ready));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.kill()
    }

    fn release(&mut self) {
        if let Err(e) = self.kill() {
            warn!(error = %e, "failed to stop player on release");
        }
        self.released = true;
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        let _ = self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_media_failure() {
        let mut player = CommandPlayer::new("/nonexistent/quiz-player", Vec::new());
        let result = player.play("clips/a.ogg");
        assert!(matches!(result, Err(QuizError::Media(_))));
        assert!(!player.is_playing());

        assert_eq!(player.poll_state(), Some((true, PlaybackState::Buffering)));
        assert_eq!(player.poll_state(), Some((false, PlaybackState::Idle)));
        assert_eq!(player.poll_state(), None);
    }

    #[test]
    fn test_stop_without_clip() {
        let mut player = CommandPlayer::new("true", Vec::new());
        player.stop().unwrap();
        assert_eq!(player.poll_state(), None);
    }

    #[test]
    fn test_released_player_refuses_play() {
        let mut player = CommandPlayer::new("true", Vec::new());
        player.release();
        assert!(player.play("clips/a.ogg").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_play_and_stop_process() {
        let mut player = CommandPlayer::new("sleep", Vec::new());
        player.play("5").unwrap();
        assert!(player.is_playing());

        player.stop().unwrap();
        assert!(!player.is_playing());

        let states: Vec<_> = std::iter::from_fn(|| player.poll_state()).collect();
        assert_eq!(
            states,
            vec![
                (true, PlaybackState::Buffering),
                (true, PlaybackState::Ready),
                (false, PlaybackState::Idle),
            ]
        );
    }
}
