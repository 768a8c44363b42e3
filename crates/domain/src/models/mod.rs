//! Domain models for the Friend League backend.

pub mod event;
pub mod invitation;
pub mod league;
pub mod member;
pub mod points;
pub mod rule;
pub mod user;

pub use event::{
    CreateEventRequest, EventDetail, EventResponse, EventSummary, ListEventsQuery,
    ListEventsResponse, UpdateEventRequest,
};
pub use invitation::{
    CreateInvitationRequest, InvitationResponse, InvitationStatus, InvitationSummary,
    ListInvitationsQuery, ListInvitationsResponse, UseInvitationRequest,
};
pub use league::{
    CreateLeagueRequest, LeagueAdminResponse, LeagueDetail, LeagueResponse, LeagueSummary,
    ListLeaguesResponse, UpdateLeagueRequest,
};
pub use member::{
    AddMemberRequest, JoinRequest, ListMembersResponse, MemberResponse, MembershipResponse,
};
pub use points::{
    AssignPointsRequest, LeaderboardEntry, LeaderboardResponse, PointsAssignment,
};
pub use rule::{
    CreateRuleRequest, ListRulesResponse, RuleCategory, RuleResponse, UpdateRuleRequest,
};
pub use user::UserPublic;
