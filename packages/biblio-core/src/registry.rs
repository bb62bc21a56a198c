//! Member registry keyed by numeric ID.

use crate::error::LibraryError;
use crate::model::{validate_text, Member, TEXT_MAX_LEN};
use crate::store::{not_found, RecordStore};

/// Registry of members, unique by ID.
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: RecordStore<Member>,
}

impl MemberRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member to the registry.
    ///
    /// # Returns
    /// `Err(InvalidInput)` if the ID is zero or the name is empty,
    /// `Err(DuplicateKey)` if the ID is already registered. On failure
    /// the registry is unchanged.
    pub fn add_member(&mut self, member: Member) -> Result<(), LibraryError> {
        if member.id == 0 {
            return Err(LibraryError::InvalidInput {
                field: "id",
                reason: "must be greater than zero".to_string(),
            });
        }
        if member.name.is_empty() {
            return Err(LibraryError::InvalidInput {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }
        validate_text("name", &member.name, TEXT_MAX_LEN)?;
        validate_text("program", &member.program, TEXT_MAX_LEN)?;

        if self.find_member(member.id).is_some() {
            return Err(LibraryError::DuplicateKey {
                entity: "member",
                key: member.id.to_string(),
            });
        }

        tracing::debug!(id = member.id, "member added");
        self.members.insert_front(member);
        Ok(())
    }

    /// Finds a member by ID. Linear scan.
    pub fn find_member(&self, id: u32) -> Option<&Member> {
        self.members.find(|m| m.id == id)
    }

    /// Iterates over all members, newest first.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Returns the number of registered members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Removes a member by ID.
    ///
    /// Outstanding loans held by the member are not checked or removed.
    ///
    /// # Returns
    /// The removed member, or `Err(NotFound)` if the ID is absent.
    pub fn remove_member(&mut self, id: u32) -> Result<Member, LibraryError> {
        let removed = self
            .members
            .remove(|m| m.id == id)
            .ok_or_else(|| not_found("member", id))?;
        tracing::debug!(id, "member removed");
        Ok(removed)
    }

    pub(crate) fn store_mut(&mut self) -> &mut RecordStore<Member> {
        &mut self.members
    }
}
