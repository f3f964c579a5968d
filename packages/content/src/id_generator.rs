use crc32fast::Hasher;

/// Generate a content id seed from a course id using CRC32
pub fn content_seed(course_id: &str) -> String {
    let mut buff = String::from(course_id);
    if !course_id.starts_with("course://") {
        buff = format!("course://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for content entities within one course.
///
/// Ids have the form `<seed>-<n>`. The seed is derived from the owning
/// course id, so ids are unique across courses and deterministic within one.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Course seed (CRC32)
    count: u32,   // Sequential counter
}

impl IdGenerator {
    pub fn new(course_id: &str) -> Self {
        Self {
            seed: content_seed(course_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Resume a generator at a known counter position. Used when a stored
    /// course is reopened so fresh ids never collide with existing ones.
    pub fn resume(seed: String, count: u32) -> Self {
        Self { seed, count }
    }

    /// Generate the next sequential id
    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// The id `next_id` would return, without consuming it.
    ///
    /// Inverse mutations are computed before application and need to name
    /// the id an add operation is about to assign.
    pub fn peek_id(&self) -> String {
        format!("{}-{}", self.seed, self.count + 1)
    }

    /// Get the course seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
