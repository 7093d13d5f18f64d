use uuid::Uuid;

/// Read-only view of the collaborator data one score computation needs:
/// job skill requirements, candidate skills and qualifications, interview
/// feedback. Loaded in one request scope so the computation is deterministic
/// over a consistent snapshot.
#[derive(Debug, Clone)]
pub struct ApplicationSnapshot {
    pub application_id: Uuid,
    pub position_id: i64,
    pub required_skill_ids: Vec<i64>,
    pub preferred_skill_ids: Vec<i64>,
    pub candidate_skills: Vec<CandidateSkill>,
    pub qualification_count: i64,
    pub feedback_ratings: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct CandidateSkill {
    pub skill_id: i64,
    pub years_of_experience: Option<f64>,
}
