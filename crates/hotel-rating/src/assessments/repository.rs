use super::domain::{
    AssessmentRecord, HotelId, HotelRecord, NewAssessment, NewHotel, RecordedAssessment,
};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations assign identifiers on insert.
pub trait AssessmentRepository: Send + Sync {
    fn find_hotel_by_name(&self, name: &str) -> Result<Option<HotelRecord>, RepositoryError>;
    /// Fails with `Conflict` when a hotel with the same name already exists.
    fn insert_hotel(&self, hotel: NewHotel) -> Result<HotelRecord, RepositoryError>;
    fn fetch_hotel(&self, id: HotelId) -> Result<Option<HotelRecord>, RepositoryError>;
    fn list_hotels(&self) -> Result<Vec<HotelRecord>, RepositoryError>;
    fn insert_assessment(
        &self,
        hotel: HotelId,
        assessment: NewAssessment,
    ) -> Result<AssessmentRecord, RepositoryError>;
    fn assessments_for(&self, hotel: HotelId) -> Result<Vec<AssessmentRecord>, RepositoryError>;

    /// Stores an assessment under the hotel named by `hotel`, registering it on first use.
    ///
    /// The provided version composes the single-record calls: a `Conflict` from a
    /// concurrent registration is resolved by reusing the winner, but a failed assessment
    /// insert leaves the new hotel without assessments. Stores that can do the lookup and
    /// both inserts in one step should override it.
    fn record_assessment(
        &self,
        hotel: NewHotel,
        assessment: NewAssessment,
    ) -> Result<RecordedAssessment, RepositoryError> {
        let (hotel, hotel_created) = match self.find_hotel_by_name(&hotel.name)? {
            Some(existing) => (existing, false),
            None => match self.insert_hotel(hotel.clone()) {
                Ok(inserted) => (inserted, true),
                Err(RepositoryError::Conflict) => (
                    self.find_hotel_by_name(&hotel.name)?
                        .ok_or(RepositoryError::NotFound)?,
                    false,
                ),
                Err(other) => return Err(other),
            },
        };

        let assessment = self.insert_assessment(hotel.id, assessment)?;
        Ok(RecordedAssessment {
            hotel,
            hotel_created,
            assessment,
        })
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
