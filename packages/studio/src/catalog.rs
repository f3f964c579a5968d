//! # Catalog Queries
//!
//! Read-side of the marketplace: browsing stored courses, free-text search
//! delegated to the hosted index, and enrollment lookups. Enrollment
//! records are read-only input here; this core never creates or mutates
//! them.

use courseforge_content::model::{Course, CourseEnrollment};
use courseforge_providers::{collections, CourseHit};
use serde::{Deserialize, Serialize};

use crate::error::StudioError;
use crate::state::Studio;

/// Course card data for browse views, derived from the stored course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub section_count: usize,
    pub lesson_count: usize,
    pub total_duration: u32,
}

impl CourseSummary {
    pub fn from_course(course: &Course) -> Self {
        Self {
            course_id: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            section_count: course.sections.len(),
            lesson_count: course.lesson_count(),
            total_duration: course.total_duration(),
        }
    }
}

impl Studio {
    /// List every stored course as a browse card
    pub async fn browse(&self) -> Result<Vec<CourseSummary>, StudioError> {
        let docs = self.store.list(collections::COURSES).await?;
        docs.into_iter()
            .map(|(_, value)| {
                let course: Course = serde_json::from_value(value)?;
                Ok(CourseSummary::from_course(&course))
            })
            .collect()
    }

    /// Free-text course search, delegated wholesale to the hosted index
    pub async fn search_courses(&self, query: &str) -> Result<Vec<CourseHit>, StudioError> {
        Ok(self.search.search(query).await?)
    }

    /// Enrollments for one user, with progress and quiz scores passed
    /// through untouched
    pub async fn enrollments_for(
        &self,
        user_id: &str,
    ) -> Result<Vec<CourseEnrollment>, StudioError> {
        let docs = self.store.list(collections::ENROLLMENTS).await?;
        let mut enrollments = Vec::new();
        for (_, value) in docs {
            let enrollment: CourseEnrollment = serde_json::from_value(value)?;
            if enrollment.user_id == user_id {
                enrollments.push(enrollment);
            }
        }
        Ok(enrollments)
    }
}
