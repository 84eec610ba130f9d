//! University IDs
//!
//! Structured identifiers of the form `YY FE BATCH DEPT NUMBER`, e.g. `22FE05CS101`:
//! a two digit year, a two letter FE code, a two digit batch, a two or three letter
//! department code and a three digit roll number.
//!
//! Exams register an inclusive range of IDs that qualify for priority orders. Two IDs
//! are only comparable when everything but the roll number matches; otherwise the
//! matcher reports the cohort mismatch rather than guessing.

use std::{cmp::Ordering, fmt, ops::Range, str::FromStr};

use thiserror::Error;

const YEAR: Range<usize> = 0..2;
const FE_CODE: Range<usize> = 2..4;
const BATCH: Range<usize> = 4..6;
const DEPARTMENT_START: usize = 6;
const NUMBER_LEN: usize = 3;

/// Length of an ID without its department code.
const FIXED_LEN: usize = 9;

/// Errors raised when parsing a university ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UniversityIdError {
    /// No ID was supplied.
    #[error("university ID is empty")]
    Empty,

    /// The ID does not follow the structured pattern.
    #[error("university ID {0:?} does not match the YY FE BATCH DEPT NUMBER pattern")]
    Malformed(String),
}

/// The non-numeric components that decide whether two IDs are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdComponent {
    /// Two digit admission year.
    Year,

    /// Two letter FE code.
    FeCode,

    /// Two digit batch.
    Batch,

    /// Department code.
    Department,
}

impl fmt::Display for IdComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "year",
            Self::FeCode => "FE code",
            Self::Batch => "batch",
            Self::Department => "department",
        })
    }
}

/// A parsed, upper-cased university ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniversityId {
    normalized: String,
    year: String,
    fe_code: String,
    batch: String,
    department: String,
    number: u16,
}

impl UniversityId {
    /// Parse an ID, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UniversityIdError::Empty`] for blank input and
    /// [`UniversityIdError::Malformed`] when the pattern does not match.
    pub fn parse(raw: &str) -> Result<Self, UniversityIdError> {
        let normalized = normalize(raw);

        if normalized.is_empty() {
            return Err(UniversityIdError::Empty);
        }

        let malformed = || UniversityIdError::Malformed(normalized.clone());

        let department_len = normalized
            .len()
            .checked_sub(FIXED_LEN)
            .filter(|len| (2..=3).contains(len))
            .ok_or_else(malformed)?;

        let department_end = DEPARTMENT_START + department_len;

        let year = digits(&normalized, YEAR).ok_or_else(malformed)?;
        let fe_code = letters(&normalized, FE_CODE).ok_or_else(malformed)?;
        let batch = digits(&normalized, BATCH).ok_or_else(malformed)?;
        let department =
            letters(&normalized, DEPARTMENT_START..department_end).ok_or_else(malformed)?;
        let number = digits(&normalized, department_end..department_end + NUMBER_LEN)
            .and_then(|number| number.parse::<u16>().ok())
            .ok_or_else(malformed)?;

        Ok(Self {
            year: year.to_string(),
            fe_code: fe_code.to_string(),
            batch: batch.to_string(),
            department: department.to_string(),
            number,
            normalized,
        })
    }

    /// The upper-cased ID as a string.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Admission year component.
    pub fn year(&self) -> &str {
        &self.year
    }

    /// FE code component.
    pub fn fe_code(&self) -> &str {
        &self.fe_code
    }

    /// Batch component.
    pub fn batch(&self) -> &str {
        &self.batch
    }

    /// Department component.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Roll number, leading zeros dropped.
    pub fn number(&self) -> u16 {
        self.number
    }

    /// The first base component in which the two IDs differ, if any.
    pub fn first_difference(&self, other: &Self) -> Option<IdComponent> {
        [
            (IdComponent::Year, &self.year, &other.year),
            (IdComponent::FeCode, &self.fe_code, &other.fe_code),
            (IdComponent::Batch, &self.batch, &other.batch),
            (IdComponent::Department, &self.department, &other.department),
        ]
        .into_iter()
        .find_map(|(component, ours, theirs)| (ours != theirs).then_some(component))
    }

    /// Whether two IDs share year, FE code, batch and department.
    pub fn same_cohort(&self, other: &Self) -> bool {
        self.first_difference(other).is_none()
    }
}

impl FromStr for UniversityId {
    type Err = UniversityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UniversityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

/// Why an ID was judged ineligible for an exam's range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeRejection {
    /// The user's ID or one of the range boundaries is missing.
    #[error(
        "Missing ID information: your university ID or the exam's registered ID range is not available."
    )]
    MissingIdInformation,

    /// The ID belongs to a different cohort or department than the range.
    #[error(
        "Your university ID {user} is from a different {component} than the registered range {start} to {end}."
    )]
    DifferentCohort {
        /// Component that differs.
        component: IdComponent,
        /// Normalized user ID.
        user: String,
        /// Normalized start of the range.
        start: String,
        /// Normalized end of the range.
        end: String,
    },

    /// The ID is comparable but falls outside the range.
    #[error("Your university ID {user} is not within the registered range {start} to {end}.")]
    OutsideRange {
        /// Normalized user ID.
        user: String,
        /// Normalized start of the range.
        start: String,
        /// Normalized end of the range.
        end: String,
    },
}

/// Verdict of matching an ID against an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeMatch {
    /// The ID lies inside the range.
    WithinRange,

    /// The ID is comparable with the range but lies outside it.
    OutOfRange(RangeRejection),

    /// The ID cannot be compared with the range: missing, or a different cohort.
    IncomparableFormat(RangeRejection),
}

impl RangeMatch {
    /// Whether the ID is eligible.
    pub fn is_within(&self) -> bool {
        matches!(self, Self::WithinRange)
    }

    /// The reason the ID is ineligible, if it is.
    pub fn rejection(&self) -> Option<&RangeRejection> {
        match self {
            Self::WithinRange => None,
            Self::OutOfRange(reason) | Self::IncomparableFormat(reason) => Some(reason),
        }
    }
}

/// Decide whether `user` lies within the inclusive range `start..=end`.
///
/// IDs are upper-cased first. When all three parse as structured IDs the base
/// components must agree with both boundaries and the roll numbers are compared
/// numerically. When any of them fails to parse the comparison falls back to plain
/// string ordering, which can misjudge IDs of different lengths.
pub fn match_range(user: &str, start: &str, end: &str) -> RangeMatch {
    let (user, start, end) = (normalize(user), normalize(start), normalize(end));

    if user.is_empty() || start.is_empty() || end.is_empty() {
        return RangeMatch::IncomparableFormat(RangeRejection::MissingIdInformation);
    }

    let (Ok(user_id), Ok(start_id), Ok(end_id)) = (
        UniversityId::parse(&user),
        UniversityId::parse(&start),
        UniversityId::parse(&end),
    ) else {
        return if start <= user && user <= end {
            RangeMatch::WithinRange
        } else {
            RangeMatch::OutOfRange(RangeRejection::OutsideRange { user, start, end })
        };
    };

    if let Some(component) = user_id
        .first_difference(&start_id)
        .or_else(|| user_id.first_difference(&end_id))
    {
        return RangeMatch::IncomparableFormat(RangeRejection::DifferentCohort {
            component,
            user,
            start,
            end,
        });
    }

    if (start_id.number..=end_id.number).contains(&user_id.number) {
        RangeMatch::WithinRange
    } else {
        RangeMatch::OutOfRange(RangeRejection::OutsideRange { user, start, end })
    }
}

/// Order two IDs: by roll number when they share a cohort, by string otherwise.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    let (a, b) = (normalize(a), normalize(b));

    match (UniversityId::parse(&a), UniversityId::parse(&b)) {
        (Ok(left), Ok(right)) if left.same_cohort(&right) => left.number.cmp(&right.number),
        _ => a.cmp(&b),
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn digits(id: &str, range: Range<usize>) -> Option<&str> {
    id.get(range)
        .filter(|segment| segment.bytes().all(|b| b.is_ascii_digit()))
}

fn letters(id: &str, range: Range<usize>) -> Option<&str> {
    id.get(range)
        .filter(|segment| segment.bytes().all(|b| b.is_ascii_uppercase()))
}
