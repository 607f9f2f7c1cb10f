//! The ordered step plan
//!
//! The order of `PLAN` is significant: the edit and delete steps consume the
//! id written by the create step. Reordering or skipping entries breaks the
//! scenario.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Method, StatusCode};

/// Characters escaped in an id path segment: everything but RFC 3986 unreserved
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Which identifier fills the `{id}` segment of a step's path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathId {
    /// Path has no id segment
    None,
    /// Id written to `RunState` by the create step
    Created,
    /// Fixture id the server does not know about
    Missing,
}

/// Which fixture payload a step sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    None,
    Create,
    Edit,
    /// All required fields empty
    Empty,
    MissingEdit,
}

/// What the response body must satisfy, on top of the status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    StatusOnly,
    /// Envelope whose `msg` equals the given text
    Message(&'static str),
    /// Envelope with the given `msg` and a non-empty `storyId`
    Created(&'static str),
    /// JSON array of story records with at least one entry
    NonEmptyList,
}

/// How a passing step changes `RunState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    RecordCreated,
    RecordEdited,
    Invalidate,
}

/// One entry of the plan
#[derive(Debug)]
pub struct StepDescriptor {
    pub name: &'static str,
    pub method: Method,
    /// Path template; `{id}` is replaced according to `id`
    pub path: &'static str,
    pub id: PathId,
    pub body: BodySource,
    pub expected_status: StatusCode,
    pub contract: Contract,
    pub effect: Effect,
    /// Used in the dependency-missing message ("No story ID available for ...")
    pub purpose: &'static str,
}

impl StepDescriptor {
    /// Whether the step needs the id produced by the create step
    pub fn requires_created_id(&self) -> bool {
        self.id == PathId::Created
    }

    /// Concrete request path for the given id, percent-encoded as one segment
    pub fn resolve_path(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self
                .path
                .replace("{id}", &utf8_percent_encode(id, ID_SEGMENT).to_string()),
            None => self.path.to_string(),
        }
    }
}

pub static PLAN: [StepDescriptor; 7] = [
    StepDescriptor {
        name: "create_story",
        method: Method::POST,
        path: "/api/Story/Create",
        id: PathId::None,
        body: BodySource::Create,
        expected_status: StatusCode::CREATED,
        contract: Contract::Created("Successfully created!"),
        effect: Effect::RecordCreated,
        purpose: "creation",
    },
    StepDescriptor {
        name: "edit_story",
        method: Method::PUT,
        path: "/api/Story/Edit/{id}",
        id: PathId::Created,
        body: BodySource::Edit,
        expected_status: StatusCode::OK,
        contract: Contract::Message("Successfully edited"),
        effect: Effect::RecordEdited,
        purpose: "editing",
    },
    StepDescriptor {
        name: "list_stories",
        method: Method::GET,
        path: "/api/Story/All",
        id: PathId::None,
        body: BodySource::None,
        expected_status: StatusCode::OK,
        contract: Contract::NonEmptyList,
        effect: Effect::None,
        purpose: "listing",
    },
    StepDescriptor {
        name: "delete_story",
        method: Method::DELETE,
        path: "/api/Story/Delete/{id}",
        id: PathId::Created,
        body: BodySource::None,
        expected_status: StatusCode::OK,
        contract: Contract::Message("Deleted successfully!"),
        effect: Effect::Invalidate,
        purpose: "deletion",
    },
    StepDescriptor {
        name: "create_story_missing_fields",
        method: Method::POST,
        path: "/api/Story/Create",
        id: PathId::None,
        body: BodySource::Empty,
        expected_status: StatusCode::BAD_REQUEST,
        contract: Contract::StatusOnly,
        effect: Effect::None,
        purpose: "creation",
    },
    StepDescriptor {
        name: "edit_missing_story",
        method: Method::PUT,
        path: "/api/Story/Edit/{id}",
        id: PathId::Missing,
        body: BodySource::MissingEdit,
        expected_status: StatusCode::NOT_FOUND,
        contract: Contract::Message("No spoilers..."),
        effect: Effect::None,
        purpose: "editing",
    },
    StepDescriptor {
        name: "delete_missing_story",
        method: Method::DELETE,
        path: "/api/Story/Delete/{id}",
        id: PathId::Missing,
        body: BodySource::None,
        expected_status: StatusCode::BAD_REQUEST,
        contract: Contract::Message("Unable to delete this story spoiler!"),
        effect: Effect::None,
        purpose: "deletion",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_order() {
        let names: Vec<_> = PLAN.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "create_story",
                "edit_story",
                "list_stories",
                "delete_story",
                "create_story_missing_fields",
                "edit_missing_story",
                "delete_missing_story",
            ]
        );
    }

    #[test]
    fn test_dependents_come_after_the_producer() {
        let producer = PLAN
            .iter()
            .position(|s| s.effect == Effect::RecordCreated)
            .unwrap();
        for (i, step) in PLAN.iter().enumerate() {
            if step.requires_created_id() {
                assert!(i > producer, "{} runs before create", step.name);
            }
        }
        assert_eq!(PLAN.iter().filter(|s| s.requires_created_id()).count(), 2);
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(PLAN[1].resolve_path(Some("abc")), "/api/Story/Edit/abc");
        assert_eq!(PLAN[2].resolve_path(None), "/api/Story/All");
    }

    #[test]
    fn test_resolve_path_keeps_id_in_one_segment() {
        assert_eq!(
            PLAN[6].resolve_path(Some("bad?id#x/y")),
            "/api/Story/Delete/bad%3Fid%23x%2Fy"
        );
        assert_eq!(
            PLAN[5].resolve_path(Some("NonExistentStoryIdASDASD")),
            "/api/Story/Edit/NonExistentStoryIdASDASD"
        );
    }

    #[test]
    fn test_negative_steps_expectations() {
        assert_eq!(PLAN[4].expected_status, StatusCode::BAD_REQUEST);
        assert_eq!(PLAN[5].expected_status, StatusCode::NOT_FOUND);
        assert_eq!(PLAN[6].contract, Contract::Message("Unable to delete this story spoiler!"));
    }
}
