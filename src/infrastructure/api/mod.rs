//! Vendor member API binding
//!
//! Four operations (list, invite, update, delete) behind a uniform result
//! shape. HTTP error responses become typed results the caller inspects;
//! only connectivity-level faults propagate as errors.

mod client;
mod types;

pub use client::{ApiResponse, HttpMemberApi, MemberApi};
pub use types::{
    DeleteMemberRequest, InviteMemberRequest, ListMembersResponse, UpdateMemberRequest,
};

#[cfg(test)]
pub use client::mock;
