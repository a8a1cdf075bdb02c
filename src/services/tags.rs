use crate::domain::tag::Tag;
use crate::repository::TagReader;
use crate::services::{ServiceError, ServiceResult};

/// Return the full tag catalog, ordered by id.
pub fn list_tags<R>(repo: &R) -> ServiceResult<Vec<Tag>>
where
    R: TagReader + ?Sized,
{
    repo.list_tags().map_err(ServiceError::from)
}

/// Return a single tag by id.
pub fn get_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<Tag>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(tag_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}
