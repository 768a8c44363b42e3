//! Repository implementations.
//!
//! Repositories own the SQL for one table each. Methods that participate in
//! a multi-statement unit of work (mutate, re-rank, propagate) take a
//! `&mut PgConnection` so the calling service can run the whole sequence in
//! a single transaction; plain reads go through the pool.

pub mod event;
pub mod event_invitation;
pub mod event_participant;
pub mod event_rule;
pub mod league;
pub mod league_admin;
pub mod league_member;
pub mod league_rule;
pub mod user;

pub use event::EventRepository;
pub use event_invitation::{EventInvitationRepository, InvitationSummaryCounts};
pub use event_participant::EventParticipantRepository;
pub use event_rule::EventRuleRepository;
pub use league::LeagueRepository;
pub use league_admin::LeagueAdminRepository;
pub use league_member::LeagueMemberRepository;
pub use league_rule::LeagueRuleRepository;
pub use user::UserRepository;
