// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Every operation takes the persistence adapter and the authenticated
//! caller, checks access, and translates lower-layer errors on the way out.
//! Lifecycle transitions follow one path: read the report, load the
//! context, apply the command, persist the result with its notifications.

use std::collections::BTreeMap;

use participium::notifications::{message_received, message_recipients};
use participium::{
    AssignmentPolicy, Command, NotificationDraft, TransitionContext, TransitionResult, apply,
};
use participium_domain::{
    Coordinates, InternalNote, NewReport, NewReportPhoto, Notification, Report, ReportCategory,
    ReportMessage, ReportStatus, Role, RoleSet, ServiceArea, UserAccount, validate_content,
    validate_coordinates, validate_description, validate_photo_count, validate_title,
};
use participium_persistence::{NewCompany, NewUser, Persistence, ReportFilter};
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::collaborators::{AddressResolver, PhotoStorage, PhotoUpload, StoredPhoto};
use crate::dispatcher::NotificationDispatcher;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ApproveReportRequest, AssignExternalRequest, AssignableExternalsResponse,
    AssignableTechnicalsResponse, CreateCompanyRequest, CreateCompanyResponse,
    CreateReportRequest, CreateReportResponse, CreateUserRequest, CreateUserResponse,
    ListInternalNotesResponse, ListMessagesResponse, ListNotificationsRequest,
    ListNotificationsResponse, ListReportsResponse, PostContentRequest,
    RegisterMaintainerCategoryRequest, RegisterMaintainerCategoryResponse, RejectReportRequest,
    ReportInfo, SendMessageResponse, TransitionResponse, UnreadCountResponse,
    UpdateStatusRequest,
};
use crate::resolver;

// ============================================================================
// Helpers
// ============================================================================

fn load_report(persistence: &mut Persistence, report_id: i64) -> Result<Report, ApiError> {
    persistence
        .get_report(report_id)
        .map_err(translate_persistence_error)
}

fn parse_category(value: &str) -> Result<ReportCategory, ApiError> {
    value.parse().map_err(translate_domain_error)
}

fn public_statuses() -> Vec<ReportStatus> {
    ReportStatus::ALL
        .into_iter()
        .filter(ReportStatus::is_publicly_visible)
        .collect()
}

/// Converts reports to their wire form, attaching reporter names.
///
/// With `hide_anonymous` the reporter of an anonymous report is omitted.
fn report_infos(
    persistence: &mut Persistence,
    reports: Vec<Report>,
    hide_anonymous: bool,
) -> Result<Vec<ReportInfo>, ApiError> {
    let mut reporter_ids: Vec<i64> = reports.iter().map(|r| r.user_id).collect();
    reporter_ids.sort_unstable();
    reporter_ids.dedup();
    let reporters: BTreeMap<i64, UserAccount> = persistence
        .list_users(&reporter_ids)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|account| (account.user_id, account))
        .collect();

    Ok(reports
        .into_iter()
        .map(|report| {
            let reporter: Option<&UserAccount> = if hide_anonymous && report.is_anonymous {
                None
            } else {
                reporters.get(&report.user_id)
            };
            ReportInfo::from_report(report, reporter)
        })
        .collect())
}

fn require_non_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(field, "must not be empty"));
    }
    Ok(())
}

// ============================================================================
// Report intake and queries
// ============================================================================

/// Stores every upload, or none: photos already written are discarded when
/// a later one fails.
fn store_photos(
    photo_storage: &dyn PhotoStorage,
    uploads: &[PhotoUpload],
) -> Result<Vec<StoredPhoto>, ApiError> {
    let mut stored: Vec<StoredPhoto> = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match photo_storage.store(upload) {
            Ok(photo) => stored.push(photo),
            Err(e) => {
                warn!(
                    original_name = %upload.original_name,
                    stored = stored.len(),
                    "Photo storage failed"
                );
                discard_photos(photo_storage, &stored);
                return Err(e);
            }
        }
    }
    Ok(stored)
}

fn discard_photos(photo_storage: &dyn PhotoStorage, stored: &[StoredPhoto]) {
    for photo in stored {
        photo_storage.discard(photo);
    }
}

/// Files a new report.
///
/// Input is validated first, then the location is checked against the
/// service area. Photos are stored and the address resolved only for a
/// report that will be persisted.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a citizen
/// - A field is malformed or the photo count is outside 1..=3
/// - The location is outside the municipal boundary
/// - A photo cannot be stored or the report cannot be persisted; photos
///   stored for it are discarded
pub fn create_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateReportRequest,
    service_area: &ServiceArea,
    photo_storage: &dyn PhotoStorage,
    address_resolver: &dyn AddressResolver,
) -> Result<CreateReportResponse, ApiError> {
    AuthorizationService::authorize_create_report(actor)?;

    validate_title(&request.title).map_err(translate_domain_error)?;
    validate_description(&request.description).map_err(translate_domain_error)?;
    let category: ReportCategory = parse_category(&request.category)?;
    let coordinates = Coordinates::new(request.latitude, request.longitude);
    validate_coordinates(&coordinates).map_err(translate_domain_error)?;
    validate_photo_count(request.photos.len()).map_err(translate_domain_error)?;

    if let Err(e) = service_area.check(&coordinates) {
        warn!(
            user_id = actor.user_id,
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "Report rejected outside the service area"
        );
        return Err(translate_domain_error(e));
    }

    let stored: Vec<StoredPhoto> = store_photos(photo_storage, &request.photos)?;
    let address: String = address_resolver.resolve(&coordinates);

    let new_report = NewReport {
        user_id: actor.user_id,
        title: request.title.trim().to_string(),
        description: request.description.trim().to_string(),
        category,
        coordinates,
        address: address.clone(),
        is_anonymous: request.is_anonymous,
        photos: stored
            .iter()
            .map(|photo| NewReportPhoto {
                url: photo.url.clone(),
                filename: photo.filename.clone(),
            })
            .collect(),
    };
    let report_id: i64 = match persistence.create_report(&new_report) {
        Ok(report_id) => report_id,
        Err(e) => {
            discard_photos(photo_storage, &stored);
            return Err(translate_persistence_error(e));
        }
    };

    info!(
        report_id,
        user_id = actor.user_id,
        category = category.as_str(),
        "Report created"
    );

    Ok(CreateReportResponse {
        report_id,
        status: ReportStatus::PendingApproval,
        address,
        message: format!("Report {report_id} submitted for approval"),
    })
}

/// Reports visible to anyone, newest first.
///
/// Only approved lifecycle states are listed. Anonymous reports carry no
/// reporter.
///
/// # Errors
///
/// Returns an error if the category is unknown or the store cannot be read.
pub fn list_public_reports(
    persistence: &mut Persistence,
    category: Option<&str>,
) -> Result<ListReportsResponse, ApiError> {
    let category: Option<ReportCategory> = category.map(parse_category).transpose()?;
    let filter = ReportFilter::with_statuses(&public_statuses()).category(category);
    let reports: Vec<Report> = persistence
        .list_reports(&filter)
        .map_err(translate_persistence_error)?;
    Ok(ListReportsResponse {
        reports: report_infos(persistence, reports, true)?,
    })
}

/// Reports waiting for review.
///
/// # Errors
///
/// Returns `Unauthorized` unless the caller is public relations staff.
pub fn list_pending_reports(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListReportsResponse, ApiError> {
    AuthorizationService::authorize_review(actor, "list_pending_reports")?;
    let reports: Vec<Report> = persistence
        .list_reports(&ReportFilter::with_statuses(&[ReportStatus::PendingApproval]))
        .map_err(translate_persistence_error)?;
    Ok(ListReportsResponse {
        reports: report_infos(persistence, reports, false)?,
    })
}

/// One report.
///
/// Publicly visible reports are readable by anyone. Pending and rejected
/// reports are only readable by their reporter and by staff; for everyone
/// else they do not exist.
///
/// # Errors
///
/// Returns `NotFound` if the report does not exist or is hidden from the
/// caller.
pub fn get_report(
    persistence: &mut Persistence,
    actor: Option<&AuthenticatedActor>,
    report_id: i64,
) -> Result<ReportInfo, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    let privileged: bool =
        actor.is_some_and(|a| a.user_id == report.user_id || a.roles.is_staff());

    if !privileged && !report.status.is_publicly_visible() {
        return Err(ApiError::not_found(
            "Report",
            format!("Report {report_id} does not exist"),
        ));
    }

    report_infos(persistence, vec![report], !privileged)?
        .pop()
        .ok_or_else(|| ApiError::not_found("Report", format!("Report {report_id} does not exist")))
}

/// The caller's own reports in every state.
///
/// # Errors
///
/// Returns `Unauthorized` unless the caller is a citizen.
pub fn list_my_reports(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListReportsResponse, ApiError> {
    AuthorizationService::require_any_role(actor, "list_my_reports", &[Role::Citizen])?;
    let reports: Vec<Report> = persistence
        .list_reports_for_owner(actor.user_id)
        .map_err(translate_persistence_error)?;
    Ok(ListReportsResponse {
        reports: report_infos(persistence, reports, false)?,
    })
}

/// Reports the caller works on, as internal assignee or external party.
///
/// # Errors
///
/// Returns `Unauthorized` if the caller holds no staff role.
pub fn list_assigned_reports(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListReportsResponse, ApiError> {
    if !actor.roles.is_staff() {
        return Err(ApiError::Unauthorized {
            action: String::from("list_assigned_reports"),
            required_role: String::from("a staff role"),
        });
    }
    let reports: Vec<Report> = persistence
        .list_reports_handled_by(actor.user_id, actor.company_id)
        .map_err(translate_persistence_error)?;
    Ok(ListReportsResponse {
        reports: report_infos(persistence, reports, false)?,
    })
}

// ============================================================================
// Lifecycle transitions
// ============================================================================

fn run_transition(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    command: Command,
    policy: AssignmentPolicy,
) -> Result<TransitionResponse, ApiError> {
    let action: &'static str = command.action_name();
    let report: Report = load_report(persistence, report_id)?;
    let context: TransitionContext =
        resolver::transition_context(persistence, &report, &command, policy)
            .map_err(translate_persistence_error)?;

    let result: TransitionResult = apply(&report, &actor.to_core_actor(), command, &context)
        .map_err(|e| {
            warn!(
                report_id,
                actor_id = actor.user_id,
                action,
                error = %e,
                "Transition refused"
            );
            translate_core_error(e)
        })?;

    let persisted = persistence.persist_transition(&result).map_err(|e| {
        warn!(report_id, actor_id = actor.user_id, action, error = %e, "Transition not persisted");
        translate_persistence_error(e)
    })?;

    info!(
        report_id,
        actor_id = actor.user_id,
        action,
        from = %result.expected_status,
        to = %result.report.status,
        version = persisted.version,
        "Transition applied"
    );

    Ok(TransitionResponse {
        report_id,
        status: result.report.status,
        version: persisted.version,
        assigned_to_id: result.report.assigned_to_id,
        external_handler: result.report.external_handler,
        notifications_created: persisted.notification_ids.len(),
    })
}

/// Approves a pending report and assigns it to an eligible technical officer.
///
/// # Errors
///
/// Returns an error if:
/// - The report is not `PENDING_APPROVAL` (`InvalidTransition`)
/// - The caller is not public relations staff
/// - The officer is not in the eligible set (`IneligibleAssignee`)
pub fn approve_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    request: ApproveReportRequest,
    policy: AssignmentPolicy,
) -> Result<TransitionResponse, ApiError> {
    let command = Command::Approve {
        assigned_technical_id: request.assigned_technical_id,
    };
    run_transition(persistence, actor, report_id, command, policy)
}

/// Rejects a pending report with a reason shown to the citizen.
///
/// # Errors
///
/// Returns an error if the report is not `PENDING_APPROVAL`, the caller is
/// not public relations staff, or the reason is blank.
pub fn reject_report(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    request: RejectReportRequest,
) -> Result<TransitionResponse, ApiError> {
    let command = Command::Reject {
        reason: request.reason,
    };
    run_transition(
        persistence,
        actor,
        report_id,
        command,
        AssignmentPolicy::default(),
    )
}

/// Delegates an `ASSIGNED` report to an external maintainer or company.
///
/// # Errors
///
/// Returns an error if:
/// - The report is not `ASSIGNED` (`InvalidTransition`)
/// - The caller is not the report's technical officer
/// - The target is not eligible or is already the handler
pub fn assign_external(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    request: AssignExternalRequest,
    policy: AssignmentPolicy,
) -> Result<TransitionResponse, ApiError> {
    let command = Command::AssignToExternal {
        handler: request.handler,
    };
    run_transition(persistence, actor, report_id, command, policy)
}

/// Moves a report between `ASSIGNED`, `IN_PROGRESS`, `SUSPENDED` and
/// `RESOLVED`.
///
/// # Errors
///
/// Returns an error if:
/// - The status is unknown or not an operator target
/// - The edge is not in the lifecycle graph, or the report is already there
/// - The caller does not handle the report
pub fn update_status(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    request: UpdateStatusRequest,
    policy: AssignmentPolicy,
) -> Result<TransitionResponse, ApiError> {
    let target: ReportStatus = request.status.parse().map_err(translate_domain_error)?;
    run_transition(
        persistence,
        actor,
        report_id,
        Command::UpdateStatus { target },
        policy,
    )
}

// ============================================================================
// Assignment candidates
// ============================================================================

/// Technical officers a report may be approved to.
///
/// # Errors
///
/// Returns `Unauthorized` unless the caller is public relations staff.
pub fn list_assignable_technicals(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    policy: AssignmentPolicy,
) -> Result<AssignableTechnicalsResponse, ApiError> {
    AuthorizationService::authorize_review(actor, "list_assignable_technicals")?;
    let report: Report = load_report(persistence, report_id)?;
    let technicals = resolver::assignable_technicals(persistence, &report, policy)
        .map_err(translate_persistence_error)?;
    Ok(AssignableTechnicalsResponse {
        report_id,
        technicals,
    })
}

/// External parties a report may be delegated to.
///
/// Readable by the report's technical officer, and by the current external
/// maintainer when re-delegation is enabled.
///
/// # Errors
///
/// Returns `Unauthorized` for any other caller.
pub fn list_assignable_externals(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    policy: AssignmentPolicy,
) -> Result<AssignableExternalsResponse, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    let delegating_officer: bool = report.is_delegating_officer(actor.user_id, &actor.roles);
    let redelegating_maintainer: bool = policy.allow_maintainer_redelegation
        && actor.roles.has_role(Role::ExternalMaintainer)
        && resolver::current_external_users(persistence, &report)
            .map_err(translate_persistence_error)?
            .contains(&actor.user_id);
    if !delegating_officer && !redelegating_maintainer {
        return Err(ApiError::Unauthorized {
            action: String::from("list_assignable_externals"),
            required_role: String::from("the report's technical officer"),
        });
    }

    let externals = resolver::assignable_externals(persistence, &report)
        .map_err(translate_persistence_error)?;
    Ok(AssignableExternalsResponse {
        report_id,
        externals,
    })
}

// ============================================================================
// Conversation and internal notes
// ============================================================================

/// Posts a message on a report and notifies the counter-party.
///
/// # Errors
///
/// Returns an error if the caller is not a participant or the content is
/// empty or too long.
pub fn send_message(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    request: PostContentRequest,
) -> Result<SendMessageResponse, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    let external_users: Vec<i64> = resolver::current_external_users(persistence, &report)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_conversation(actor, &report, &external_users)?;
    validate_content(&request.content).map_err(translate_domain_error)?;

    let recipients: Vec<i64> = message_recipients(&report, &actor.to_core_actor(), &external_users);
    let drafts: Vec<NotificationDraft> = recipients
        .iter()
        .map(|recipient| message_received(&report, *recipient))
        .collect();

    let message: ReportMessage = persistence
        .append_message(report_id, actor.user_id, &request.content, &drafts)
        .map_err(translate_persistence_error)?;

    info!(
        report_id,
        message_id = message.message_id,
        sender_id = actor.user_id,
        notified = recipients.len(),
        "Message posted"
    );

    Ok(SendMessageResponse {
        message,
        notified_user_ids: recipients,
    })
}

/// The report's conversation, oldest first.
///
/// # Errors
///
/// Returns `Unauthorized` if the caller is not a participant.
pub fn list_messages(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
) -> Result<ListMessagesResponse, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    let external_users: Vec<i64> = resolver::current_external_users(persistence, &report)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_conversation(actor, &report, &external_users)?;

    let messages: Vec<ReportMessage> = persistence
        .list_messages(report_id)
        .map_err(translate_persistence_error)?;
    Ok(ListMessagesResponse {
        report_id,
        messages,
    })
}

/// Adds a staff-only note to a report.
///
/// # Errors
///
/// Returns an error if the report does not exist, the caller may not see
/// its notes, or the content is invalid.
pub fn add_internal_note(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
    request: PostContentRequest,
) -> Result<InternalNote, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    let external_users: Vec<i64> = resolver::current_external_users(persistence, &report)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_internal_notes(actor, &external_users)?;
    validate_content(&request.content).map_err(translate_domain_error)?;

    let note: InternalNote = persistence
        .append_internal_note(
            report_id,
            &actor.to_account(),
            &actor.display_role(),
            &request.content,
        )
        .map_err(translate_persistence_error)?;
    info!(
        report_id,
        note_id = note.note_id,
        author_id = actor.user_id,
        "Internal note added"
    );
    Ok(note)
}

/// Staff-only notes on a report, oldest first.
///
/// # Errors
///
/// Returns `NotFound` for an unknown report, `Unauthorized` if the caller
/// is neither municipal staff nor the report's external handler.
pub fn list_internal_notes(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    report_id: i64,
) -> Result<ListInternalNotesResponse, ApiError> {
    let report: Report = load_report(persistence, report_id)?;
    let external_users: Vec<i64> = resolver::current_external_users(persistence, &report)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_internal_notes(actor, &external_users)?;
    let notes: Vec<InternalNote> = persistence
        .list_internal_notes(report_id)
        .map_err(translate_persistence_error)?;
    Ok(ListInternalNotesResponse { report_id, notes })
}

// ============================================================================
// Notifications
// ============================================================================

/// The caller's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_notifications(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: ListNotificationsRequest,
) -> Result<ListNotificationsResponse, ApiError> {
    let mut dispatcher = NotificationDispatcher::new(persistence);
    let notifications: Vec<Notification> =
        dispatcher.list_for_user(actor.user_id, request.unread_only, request.limit)?;
    let unread_count: i64 = dispatcher.unread_count(actor.user_id)?;
    Ok(ListNotificationsResponse {
        notifications,
        unread_count,
    })
}

/// Marks one of the caller's notifications read.
///
/// # Errors
///
/// Returns `NotFound` if the notification is not the caller's.
pub fn mark_notification_read(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    notification_id: i64,
) -> Result<Notification, ApiError> {
    NotificationDispatcher::new(persistence).mark_read(notification_id, actor.user_id)
}

/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn unread_notification_count(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<UnreadCountResponse, ApiError> {
    let unread_count: i64 = NotificationDispatcher::new(persistence).unread_count(actor.user_id)?;
    Ok(UnreadCountResponse { unread_count })
}

// ============================================================================
// Administration
// ============================================================================

/// Creates a platform account.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The username or display name is blank, or the role set is empty
/// - A role name is unknown or the username is taken
/// - `company_id` names no company
pub fn create_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, ApiError> {
    AuthorizationService::authorize_administration(actor, "create_user")?;
    require_non_blank("username", &request.username)?;
    require_non_blank("display_name", &request.display_name)?;
    let roles: RoleSet = RoleSet::parse(&request.roles).map_err(translate_domain_error)?;
    if roles.is_empty() {
        return Err(ApiError::validation("roles", "at least one role is required"));
    }
    if let Some(company_id) = request.company_id {
        persistence
            .get_company(company_id)
            .map_err(translate_persistence_error)?;
    }

    let new_user = NewUser {
        username: request.username.trim().to_string(),
        display_name: request.display_name.trim().to_string(),
        roles,
        company_id: request.company_id,
    };
    let user_id: i64 = persistence
        .create_user(&new_user)
        .map_err(translate_persistence_error)?;

    info!(user_id, username = %new_user.username, admin_id = actor.user_id, "User created");

    Ok(CreateUserResponse {
        user_id,
        username: new_user.username,
        roles: new_user.roles.names(),
    })
}

/// Registers an external maintenance company.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator, the name is
/// blank or taken, or a category is unknown.
pub fn create_company(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: CreateCompanyRequest,
) -> Result<CreateCompanyResponse, ApiError> {
    AuthorizationService::authorize_administration(actor, "create_company")?;
    require_non_blank("name", &request.name)?;
    let categories: Vec<ReportCategory> = request
        .categories
        .iter()
        .map(|c| parse_category(c))
        .collect::<Result<Vec<ReportCategory>, ApiError>>()?;

    let company = NewCompany {
        name: request.name.trim().to_string(),
        categories,
        has_platform_access: request.has_platform_access,
    };
    let company_id: i64 = persistence
        .create_company(&company)
        .map_err(translate_persistence_error)?;

    info!(company_id, name = %company.name, admin_id = actor.user_id, "Company created");

    Ok(CreateCompanyResponse {
        company_id,
        name: company.name,
    })
}

/// Records that an independent external maintainer covers a category.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator, the user does
/// not exist, or the user is not an independent external maintainer.
pub fn register_maintainer_category(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: RegisterMaintainerCategoryRequest,
) -> Result<RegisterMaintainerCategoryResponse, ApiError> {
    AuthorizationService::authorize_administration(actor, "register_maintainer_category")?;
    let category: ReportCategory = parse_category(&request.category)?;
    let maintainer: UserAccount = persistence
        .get_user(user_id)
        .map_err(translate_persistence_error)?;
    if !maintainer.roles.has_role(Role::ExternalMaintainer) || maintainer.company_id.is_some() {
        return Err(ApiError::validation(
            "user_id",
            format!("User {user_id} is not an independent external maintainer"),
        ));
    }

    let created: bool = persistence
        .register_maintainer_category(user_id, category)
        .map_err(translate_persistence_error)?;

    Ok(RegisterMaintainerCategoryResponse {
        user_id,
        category: category.as_str().to_string(),
        created,
    })
}
