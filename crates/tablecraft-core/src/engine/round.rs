use crate::{PlacedPiece, RoundError, Template};

/// Time limit of a table-building round in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RoundPhase {
    Drawing,
    Finished,
}

/// Outcome of advancing the round clock by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RoundTick {
    Running { remaining_secs: u32 },
    /// The clock just reached zero. Reported once; the host should finish the round.
    Expired,
    Finished,
}

/// State of a single table-building round.
///
/// The round owns its template and the pieces placed so far. Pieces are only
/// appended while the round is [`RoundPhase::Drawing`] and time remains; the
/// collection is cleared only by [`BuildRound::restart`].
///
/// # Example
///
/// ```
/// use tablecraft_core::{BuildRound, PlacedPiece, TableTemplate};
///
/// let mut round = BuildRound::new(TableTemplate::default().build());
/// round.place(PlacedPiece::centered_at(310, 250, 20)).unwrap();
/// assert_eq!(round.pieces().len(), 1);
///
/// let pieces = round.finish();
/// assert_eq!(pieces.len(), 1);
/// assert!(round.is_finished());
/// ```
#[derive(Debug, Clone)]
pub struct BuildRound {
    template: Template,
    pieces: Vec<PlacedPiece>,
    time_limit_secs: u32,
    remaining_secs: u32,
    phase: RoundPhase,
}

impl BuildRound {
    /// Starts a round with the default 30 second time limit.
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self::with_time_limit(template, DEFAULT_TIME_LIMIT_SECS)
    }

    #[must_use]
    pub fn with_time_limit(template: Template, time_limit_secs: u32) -> Self {
        Self {
            template,
            pieces: vec![],
            time_limit_secs,
            remaining_secs: time_limit_secs,
            phase: RoundPhase::Drawing,
        }
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Appends a piece to the round.
    pub fn place(&mut self, piece: PlacedPiece) -> Result<(), RoundError> {
        if self.phase.is_finished() {
            return Err(RoundError::Finished);
        }
        if self.remaining_secs == 0 {
            return Err(RoundError::TimeUp);
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Advances the round clock by one second.
    pub fn tick(&mut self) -> RoundTick {
        if self.phase.is_finished() {
            return RoundTick::Finished;
        }
        match self.remaining_secs {
            // Already reported as expired; waiting for the host to finish the round
            0 => RoundTick::Running { remaining_secs: 0 },
            1 => {
                self.remaining_secs = 0;
                RoundTick::Expired
            }
            n => {
                self.remaining_secs = n - 1;
                RoundTick::Running {
                    remaining_secs: self.remaining_secs,
                }
            }
        }
    }

    /// Closes the round and returns the pieces to score.
    ///
    /// Finishing twice is harmless; the pieces are left untouched.
    pub fn finish(&mut self) -> &[PlacedPiece] {
        self.phase = RoundPhase::Finished;
        &self.pieces
    }

    /// Starts a new round on the same template.
    pub fn restart(&mut self) {
        self.pieces.clear();
        self.remaining_secs = self.time_limit_secs;
        self.phase = RoundPhase::Drawing;
    }
}
