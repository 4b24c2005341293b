/// Something that can be picked by a user-supplied name or ID.
pub trait Candidate {
    fn candidate_id(&self) -> &str;
    fn candidate_name(&self) -> &str;
}

impl Candidate for crate::azure::projects::Project {
    fn candidate_id(&self) -> &str {
        &self.id
    }

    fn candidate_name(&self) -> &str {
        &self.name
    }
}

impl Candidate for crate::azure::teams::Team {
    fn candidate_id(&self) -> &str {
        &self.id
    }

    fn candidate_name(&self) -> &str {
        &self.name
    }
}

/// Resolve `query` to a candidate ID, case-insensitively.
///
/// The first candidate (in slice order) whose name contains `query` wins; only
/// when no name matches is `query` compared against the IDs for equality.
pub fn fuzzy_resolve<'a, C: Candidate>(candidates: &'a [C], query: &str) -> Option<&'a str> {
    let needle = query.trim().to_lowercase();

    candidates
        .iter()
        .find(|c| c.candidate_name().to_lowercase().contains(&needle))
        .or_else(|| {
            candidates
                .iter()
                .find(|c| c.candidate_id().to_lowercase() == needle)
        })
        .map(|c| c.candidate_id())
}
