use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessments::{
    assessment_router, AssessmentId, AssessmentRecord, AssessmentRepository, AssessmentService,
    HotelId, HotelRecord, NewAssessment, NewHotel, RecordedAssessment, RepositoryError,
    SurveySubmission,
};
use crate::rating::RatingEngine;
use crate::survey::{AnswerScale, CriterionId, SurveyAnswer, SurveyCatalog};

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(
        repository.clone(),
        RatingEngine::default(),
        AnswerScale::default(),
    );
    (service, repository)
}

/// Every catalog criterion answered with the same score.
pub(super) fn uniform_answers(score: f64) -> Vec<SurveyAnswer> {
    SurveyCatalog::standard()
        .categories()
        .iter()
        .flat_map(|spec| spec.criteria.iter())
        .map(|criterion| SurveyAnswer {
            criterion_id: criterion.id.clone(),
            score,
        })
        .collect()
}

pub(super) fn submission(hotel_name: &str, score: f64) -> SurveySubmission {
    SurveySubmission {
        hotel_name: hotel_name.to_string(),
        address: Some("1 Harbour Road".to_string()),
        answers: uniform_answers(score),
    }
}

pub(super) fn answer(id: &str, score: f64) -> SurveyAnswer {
    SurveyAnswer {
        criterion_id: CriterionId::from(id),
        score,
    }
}

#[derive(Default)]
struct MemoryState {
    hotels: Vec<HotelRecord>,
    assessments: Vec<AssessmentRecord>,
}

impl MemoryState {
    fn register(&mut self, hotel: NewHotel) -> HotelRecord {
        let record = HotelRecord {
            id: HotelId(self.hotels.len() as u64 + 1),
            name: hotel.name,
            address: hotel.address,
        };
        self.hotels.push(record.clone());
        record
    }

    fn append(&mut self, hotel: HotelId, assessment: NewAssessment) -> AssessmentRecord {
        let id = AssessmentId(self.assessments.len() as u64 + 1);
        let record = assessment.into_record(id, hotel);
        self.assessments.push(record.clone());
        record
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub(super) fn assessment_count(&self) -> usize {
        self.state
            .lock()
            .expect("repository mutex poisoned")
            .assessments
            .len()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn find_hotel_by_name(&self, name: &str) -> Result<Option<HotelRecord>, RepositoryError> {
        let guard = self.state.lock().expect("repository mutex poisoned");
        Ok(guard.hotels.iter().find(|hotel| hotel.name == name).cloned())
    }

    fn insert_hotel(&self, hotel: NewHotel) -> Result<HotelRecord, RepositoryError> {
        let mut guard = self.state.lock().expect("repository mutex poisoned");
        if guard.hotels.iter().any(|existing| existing.name == hotel.name) {
            return Err(RepositoryError::Conflict);
        }
        Ok(guard.register(hotel))
    }

    fn fetch_hotel(&self, id: HotelId) -> Result<Option<HotelRecord>, RepositoryError> {
        let guard = self.state.lock().expect("repository mutex poisoned");
        Ok(guard.hotels.iter().find(|hotel| hotel.id == id).cloned())
    }

    fn list_hotels(&self) -> Result<Vec<HotelRecord>, RepositoryError> {
        let guard = self.state.lock().expect("repository mutex poisoned");
        Ok(guard.hotels.clone())
    }

    fn insert_assessment(
        &self,
        hotel: HotelId,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.state.lock().expect("repository mutex poisoned");
        Ok(guard.append(hotel, assessment))
    }

    fn assessments_for(&self, hotel: HotelId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.state.lock().expect("repository mutex poisoned");
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
        let mut guard = self.state.lock().expect("repository mutex poisoned");
        let existing = guard.hotels.iter().find(|known| known.name == hotel.name).cloned();
        let (hotel, hotel_created) = match existing {
            Some(existing) => (existing, false),
            None => (guard.register(hotel), true),
        };
        let assessment = guard.append(hotel.id, assessment);
        Ok(RecordedAssessment {
            hotel,
            hotel_created,
            assessment,
        })
    }
}

/// Hides every hotel from its first name lookup, as if another writer registered it
/// between the lookup and the insert.
pub(super) struct LaggingRepository {
    inner: MemoryRepository,
    lagged: AtomicBool,
}

impl LaggingRepository {
    pub(super) fn new(inner: MemoryRepository) -> Self {
        Self {
            inner,
            lagged: AtomicBool::new(false),
        }
    }
}

impl AssessmentRepository for LaggingRepository {
    fn find_hotel_by_name(&self, name: &str) -> Result<Option<HotelRecord>, RepositoryError> {
        if !self.lagged.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_hotel_by_name(name)
    }

    fn insert_hotel(&self, hotel: NewHotel) -> Result<HotelRecord, RepositoryError> {
        self.inner.insert_hotel(hotel)
    }

    fn fetch_hotel(&self, id: HotelId) -> Result<Option<HotelRecord>, RepositoryError> {
        self.inner.fetch_hotel(id)
    }

    fn list_hotels(&self) -> Result<Vec<HotelRecord>, RepositoryError> {
        self.inner.list_hotels()
    }

    fn insert_assessment(
        &self,
        hotel: HotelId,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError> {
        self.inner.insert_assessment(hotel, assessment)
    }

    fn assessments_for(&self, hotel: HotelId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        self.inner.assessments_for(hotel)
    }
}

/// Stores single records normally but refuses combined survey writes.
pub(super) struct RejectingRepository {
    inner: MemoryRepository,
}

impl RejectingRepository {
    pub(super) fn new(inner: MemoryRepository) -> Self {
        Self { inner }
    }
}

impl AssessmentRepository for RejectingRepository {
    fn find_hotel_by_name(&self, name: &str) -> Result<Option<HotelRecord>, RepositoryError> {
        self.inner.find_hotel_by_name(name)
    }

    fn insert_hotel(&self, hotel: NewHotel) -> Result<HotelRecord, RepositoryError> {
        self.inner.insert_hotel(hotel)
    }

    fn fetch_hotel(&self, id: HotelId) -> Result<Option<HotelRecord>, RepositoryError> {
        self.inner.fetch_hotel(id)
    }

    fn list_hotels(&self) -> Result<Vec<HotelRecord>, RepositoryError> {
        self.inner.list_hotels()
    }

    fn insert_assessment(
        &self,
        hotel: HotelId,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError> {
        self.inner.insert_assessment(hotel, assessment)
    }

    fn assessments_for(&self, hotel: HotelId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        self.inner.assessments_for(hotel)
    }

    fn record_assessment(
        &self,
        _hotel: NewHotel,
        _assessment: NewAssessment,
    ) -> Result<RecordedAssessment, RepositoryError> {
        Err(RepositoryError::Unavailable("storage full".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn find_hotel_by_name(&self, _name: &str) -> Result<Option<HotelRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_hotel(&self, _hotel: NewHotel) -> Result<HotelRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_hotel(&self, _id: HotelId) -> Result<Option<HotelRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_hotels(&self) -> Result<Vec<HotelRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_assessment(
        &self,
        _hotel: HotelId,
        _assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn assessments_for(&self, _hotel: HotelId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}
