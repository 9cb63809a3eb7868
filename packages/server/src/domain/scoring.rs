//! Compatibility scoring between two learners.
//!
//! Score formula:
//! ```text
//! language = 50 if b learns a's preferred language
//!          + 50 if a learns b's preferred language
//! if language == 0 -> 0 (incompatible)
//! score = language
//!       + 5 * |shared interests|
//!       + 3 * |proficiency(a) - proficiency(b)|
//! ```

use super::entity::UserProfile;

/// Points for each direction of language complementarity.
pub const LANGUAGE_MATCH_POINTS: u32 = 50;
/// Points per interest present in both profiles.
pub const SHARED_INTEREST_POINTS: u32 = 5;
/// Points per step of proficiency difference.
pub const PROFICIENCY_GAP_POINTS: u32 = 3;

/// Calculate the compatibility score of `a` and `b`.
///
/// Returns 0 when neither user speaks what the other is learning; such a pair
/// must never be matched. The function is pure and symmetric.
pub fn compatibility_score(a: &UserProfile, b: &UserProfile) -> u32 {
    let language_score = language_score(a, b);
    if language_score == 0 {
        return 0;
    }

    language_score + interest_score(a, b) + proficiency_score(a, b)
}

#[inline]
fn language_score(a: &UserProfile, b: &UserProfile) -> u32 {
    let mut score = 0;
    if b.learning_languages.contains(&a.preferred_language) {
        score += LANGUAGE_MATCH_POINTS;
    }
    if a.learning_languages.contains(&b.preferred_language) {
        score += LANGUAGE_MATCH_POINTS;
    }
    score
}

#[inline]
fn interest_score(a: &UserProfile, b: &UserProfile) -> u32 {
    let shared = a.interests.intersection(&b.interests).count() as u32;
    shared * SHARED_INTEREST_POINTS
}

/// Complementary skill levels (e.g. Beginner with Advanced) score higher.
#[inline]
fn proficiency_score(a: &UserProfile, b: &UserProfile) -> u32 {
    a.proficiency.ordinal().abs_diff(b.proficiency.ordinal()) * PROFICIENCY_GAP_POINTS
}
