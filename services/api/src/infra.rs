use hotel_rating::assessments::{
    AssessmentId, AssessmentRecord, AssessmentRepository, HotelId, HotelRecord, NewAssessment,
    NewHotel, RecordedAssessment, RepositoryError,
};
use hotel_rating::config::SurveyConfig;
use hotel_rating::error::AppError;
use hotel_rating::rating::{Category, RatingEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct RegistryState {
    hotels: BTreeMap<HotelId, HotelRecord>,
    assessments: Vec<AssessmentRecord>,
    next_hotel_id: u64,
    next_assessment_id: u64,
}

impl RegistryState {
    fn hotel_named(&self, name: &str) -> Option<&HotelRecord> {
        self.hotels.values().find(|hotel| hotel.name == name)
    }

    fn register_hotel(&mut self, hotel: NewHotel) -> HotelRecord {
        self.next_hotel_id += 1;
        let record = HotelRecord {
            id: HotelId(self.next_hotel_id),
            name: hotel.name,
            address: hotel.address,
        };
        self.hotels.insert(record.id, record.clone());
        record
    }

    fn append_assessment(&mut self, hotel: HotelId, assessment: NewAssessment) -> AssessmentRecord {
        self.next_assessment_id += 1;
        let record = assessment.into_record(AssessmentId(self.next_assessment_id), hotel);
        self.assessments.push(record.clone());
        record
    }
}

/// Process-local hotel registry backing the HTTP service and the demo.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    state: Arc<Mutex<RegistryState>>,
}

impl InMemoryAssessmentRepository {
    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn find_hotel_by_name(&self, name: &str) -> Result<Option<HotelRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.hotel_named(name).cloned())
    }

    fn insert_hotel(&self, hotel: NewHotel) -> Result<HotelRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.hotel_named(&hotel.name).is_some() {
            return Err(RepositoryError::Conflict);
        }
        Ok(guard.register_hotel(hotel))
    }

    fn fetch_hotel(&self, id: HotelId) -> Result<Option<HotelRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.hotels.get(&id).cloned())
    }

    fn list_hotels(&self) -> Result<Vec<HotelRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.hotels.values().cloned().collect())
    }

    fn insert_assessment(
        &self,
        hotel: HotelId,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if !guard.hotels.contains_key(&hotel) {
            return Err(RepositoryError::NotFound);
        }
        Ok(guard.append_assessment(hotel, assessment))
    }

    fn assessments_for(&self, hotel: HotelId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .assessments
            .iter()
            .filter(|record| record.hotel_id == hotel)
            .cloned()
            .collect())
    }

    fn record_assessment(
        &self,
        hotel: NewHotel,
        assessment: NewAssessment,
    ) -> Result<RecordedAssessment, RepositoryError> {
        let mut guard = self.lock()?;
        let existing = guard.hotel_named(&hotel.name).cloned();
        let (hotel, hotel_created) = match existing {
            Some(existing) => (existing, false),
            None => (guard.register_hotel(hotel), true),
        };
        let assessment = guard.append_assessment(hotel.id, assessment);

        Ok(RecordedAssessment {
            hotel,
            hotel_created,
            assessment,
        })
    }
}

/// Builds the engine from the configured rating tables, falling back to the standard ones.
pub(crate) fn rating_engine(config: &SurveyConfig) -> Result<RatingEngine, AppError> {
    let tables = config.rating_config()?;
    if let Some(path) = &config.rating_config_path {
        info!(path = %path.display(), "loaded custom rating tables");
    }
    Ok(RatingEngine::new(tables))
}

/// Parses `category=value` pairs given on the command line.
pub(crate) fn parse_score(raw: &str) -> Result<(Category, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=VALUE, got '{raw}'"))?;
    let category = key
        .parse::<Category>()
        .map_err(|err| format!("{err} (expected one of {})", category_keys()))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse score '{value}' ({err})"))?;
    if !value.is_finite() {
        return Err(format!("score for {category} must be a finite number"));
    }
    Ok((category, value))
}

fn category_keys() -> String {
    Category::ordered()
        .iter()
        .map(|category| category.key())
        .collect::<Vec<_>>()
        .join(", ")
}
