//! Game rounds and their history

use flagdraw_config::DEFAULT_ASPECT_RATIO;
use flagdraw_ipc::{ComparisonResult, FlagEntry};
use flagdraw_scoring::{AccuracyScorer, HttpFetcher, ReferenceFetcher};
use painting::DrawingSurface;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::SessionError;

/// Outcome of one finished or skipped round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub country: FlagEntry,
    pub result: ComparisonResult,
    /// Exported drawing, absent when the round was skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<String>,
}

impl GameRecord {
    pub fn skipped(&self) -> bool {
        self.drawing.is_none() && self.result.is_zero()
    }

    /// Accuracy as shown to the player
    ///
    /// A submitted drawing that scored zero (usually because scoring
    /// failed) reads "N/A".
    pub fn accuracy_label(&self) -> String {
        if self.result.accuracy != 0.0 {
            self.result.to_string()
        } else if self.drawing.is_some() {
            "N/A".to_string()
        } else {
            "Skipped!".to_string()
        }
    }

    /// Heading for the round summary
    pub fn title(&self) -> &'static str {
        if self.skipped() { "Skipped!" } else { "Complete!" }
    }
}

/// A run of rounds over one dataset
///
/// Rounds are picked by index or at random; history lives only as long as
/// the session.
#[derive(Debug)]
pub struct GameSession<F = HttpFetcher> {
    countries: Vec<FlagEntry>,
    current: usize,
    history: Vec<GameRecord>,
    scorer: AccuracyScorer<F>,
}

impl<F: ReferenceFetcher> GameSession<F> {
    /// Start a session at the first country
    ///
    /// `countries` must not be empty; [`crate::parse_dataset`] guarantees it.
    pub fn new(countries: Vec<FlagEntry>, scorer: AccuracyScorer<F>) -> Self {
        Self {
            countries,
            current: 0,
            history: Vec::new(),
            scorer,
        }
    }

    pub fn countries(&self) -> &[FlagEntry] {
        &self.countries
    }

    pub fn history(&self) -> &[GameRecord] {
        &self.history
    }

    pub fn round_index(&self) -> usize {
        self.current
    }

    /// Country being drawn this round
    pub fn current(&self) -> Option<&FlagEntry> {
        self.countries.get(self.current)
    }

    /// Switch to the country at `index`
    pub fn start_round(&mut self, index: usize) -> Result<&FlagEntry, SessionError> {
        let len = self.countries.len();
        let country = self
            .countries
            .get(index)
            .ok_or(SessionError::RoundOutOfRange { index, len })?;
        self.current = index;
        info!("Round {}: {}", self.history.len() + 1, country.name);
        Ok(country)
    }

    /// Switch to a country picked uniformly at random
    pub fn random_round(&mut self) -> Result<&FlagEntry, SessionError> {
        if self.countries.is_empty() {
            return Err(SessionError::NoCountries);
        }
        let index = rand::rng().random_range(0..self.countries.len());
        self.start_round(index)
    }

    /// Size the surface to the current flag's proportions
    ///
    /// Returns the aspect ratio used. That is 3:2 when the flag can't be
    /// loaded or its proportions give a surface too large to allocate.
    pub async fn fit_surface(
        &self,
        surface: &mut DrawingSurface,
        display_width: u32,
    ) -> Result<f32, SessionError> {
        let country = self.current_or_err()?;
        let ratio = self.scorer.aspect_ratio_of(&country.reference_image_url).await;
        if let Err(e) = surface.resize(display_width, ratio) {
            warn!("Flag of {} doesn't fit the surface: {}", country.name, e);
            surface.resize(display_width, DEFAULT_ASPECT_RATIO)?;
            return Ok(DEFAULT_ASPECT_RATIO);
        }
        Ok(ratio)
    }

    /// Submit the drawing: score it, record it, and clear the surface
    pub async fn finish_round(
        &mut self,
        surface: &mut DrawingSurface,
    ) -> Result<&GameRecord, SessionError> {
        let country = self.current_or_err()?.clone();
        let drawing = surface.export_image();

        let result = match &drawing {
            Some(url) => self.scorer.score_attempt(url, &country.reference_image_url).await,
            None => ComparisonResult::ZERO,
        };
        surface.reset();

        info!("Finished {} with accuracy {}", country.name, result);
        Ok(self.record(GameRecord {
            country,
            result,
            drawing,
        }))
    }

    /// Give up on the current country without scoring
    pub fn skip_round(
        &mut self,
        surface: &mut DrawingSurface,
    ) -> Result<&GameRecord, SessionError> {
        let country = self.current_or_err()?.clone();
        surface.reset();

        info!("Skipped {}", country.name);
        Ok(self.record(GameRecord {
            country,
            result: ComparisonResult::ZERO,
            drawing: None,
        }))
    }

    fn current_or_err(&self) -> Result<&FlagEntry, SessionError> {
        self.current().ok_or(SessionError::RoundOutOfRange {
            index: self.current,
            len: self.countries.len(),
        })
    }

    fn record(&mut self, record: GameRecord) -> &GameRecord {
        self.history.push(record);
        &self.history[self.history.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use flagdraw_config::ScoringConfig;
    use glam::Vec2;
    use painting::{HexColor, Tool};

    use super::*;

    /// A white flag served inline, the same size as the blank surface
    fn white_flag(name: &str) -> FlagEntry {
        let mut blank = DrawingSurface::default();
        blank.resize(60, 1.5).unwrap();
        FlagEntry {
            name: name.into(),
            reference_image_url: blank.export_image().unwrap(),
            alt: None,
            emoji: None,
        }
    }

    fn session(countries: Vec<FlagEntry>) -> GameSession {
        GameSession::new(countries, AccuracyScorer::new(ScoringConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_finish_round_scores_and_resets() {
        let mut game = session(vec![white_flag("Snowland")]);
        let mut surface = DrawingSurface::default();
        assert_eq!(game.fit_surface(&mut surface, 120).await.unwrap(), 1.5);
        assert_eq!((surface.width(), surface.height()), (120, 80));

        surface
            .begin_stroke(Vec2::new(0.0, 40.0), Tool::Pen, HexColor::BLACK, 20)
            .unwrap();
        surface.continue_stroke(Vec2::new(120.0, 40.0));
        surface.end_stroke();

        let record = game.finish_round(&mut surface).await.unwrap().clone();
        assert_eq!(record.country.name, "Snowland");
        assert!(record.drawing.is_some());
        assert!(record.result.accuracy > 0.0 && record.result.accuracy < 100.0);
        assert_eq!(record.title(), "Complete!");
        assert!(record.accuracy_label().ends_with('%'));

        assert_eq!(surface.undo_count(), 0);
        assert_eq!(surface.pixel(60, 40), Some(painting::BACKGROUND_COLOR));
        assert_eq!(game.history().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_drawing_is_perfect_on_white() {
        let mut game = session(vec![white_flag("Snowland")]);
        let mut surface = DrawingSurface::default();
        game.fit_surface(&mut surface, 90).await.unwrap();

        let record = game.finish_round(&mut surface).await.unwrap();
        assert_eq!(record.accuracy_label(), "100.00%");
    }

    #[tokio::test]
    async fn test_unreachable_flag_reads_na() {
        let mut country = white_flag("Ghost");
        country.reference_image_url = "http://127.0.0.1:9/ghost.png".into();
        let mut game = session(vec![country]);

        let mut surface = DrawingSurface::default();
        assert_eq!(game.fit_surface(&mut surface, 90).await.unwrap(), 1.5);

        let record = game.finish_round(&mut surface).await.unwrap();
        assert!(record.result.is_zero());
        assert_eq!(record.accuracy_label(), "N/A");
        assert_eq!(record.title(), "Complete!");
    }

    #[tokio::test]
    async fn test_extreme_flag_falls_back_to_default_ratio() {
        let mut ribbon = DrawingSurface::default();
        ribbon.resize(2, 0.002).unwrap();
        let country = FlagEntry {
            name: "Ribbon".into(),
            reference_image_url: ribbon.export_image().unwrap(),
            alt: None,
            emoji: None,
        };
        let game = session(vec![country]);

        let mut surface = DrawingSurface::default();
        let ratio = game.fit_surface(&mut surface, 256).await.unwrap();
        assert_eq!(ratio, DEFAULT_ASPECT_RATIO);
        assert_eq!((surface.width(), surface.height()), (256, 170));
    }

    #[test]
    fn test_random_round_stays_in_range() {
        let mut game = session(vec![white_flag("A"), white_flag("B"), white_flag("C")]);
        for _ in 0..20 {
            let name = game.random_round().unwrap().name.clone();
            assert!(["A", "B", "C"].contains(&name.as_str()));
            assert_eq!(game.current().unwrap().name, name);
        }

        let mut empty = session(Vec::new());
        assert!(matches!(empty.random_round(), Err(SessionError::NoCountries)));
    }

    #[test]
    fn test_skip_round() {
        let mut game = session(vec![white_flag("A"), white_flag("B")]);
        let mut surface = DrawingSurface::default();
        surface.resize(40, 2.0).unwrap();

        game.start_round(1).unwrap();
        let record = game.skip_round(&mut surface).unwrap();
        assert_eq!(record.country.name, "B");
        assert!(record.skipped());
        assert_eq!(record.accuracy_label(), "Skipped!");
        assert_eq!(record.title(), "Skipped!");
    }

    #[test]
    fn test_round_out_of_range() {
        let mut game = session(vec![white_flag("A")]);
        assert!(matches!(
            game.start_round(3),
            Err(SessionError::RoundOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(game.round_index(), 0);
        assert_eq!(game.current().unwrap().name, "A");
    }

    #[test]
    fn test_labels() {
        let record = GameRecord {
            country: white_flag("A"),
            result: ComparisonResult::from_counts(1, 3),
            drawing: Some("data:".into()),
        };
        assert_eq!(record.accuracy_label(), "66.67%");
    }
}
