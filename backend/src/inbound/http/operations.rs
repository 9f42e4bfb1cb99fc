//! Operations endpoint exposing the directory API.
//!
//! ```text
//! POST /api/v1/operations {"operation":"findPerson","arguments":{"name":"Midu"}}
//! ```
//!
//! The envelope names one operation and carries its arguments. The name is
//! decoded into an [`OperationRequest`] and dispatched through an explicit
//! match; successful responses wrap the result as `{"data": ...}`.

use actix_web::{HttpResponse, post, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::directory_errors::{invalid_args, login_validation};
use crate::domain::ports::{AddPersonRequest, PhonePresence};
use crate::domain::{
    Credential, Error, LoginCredentials, Person, RequestContext, User, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::RequestIdentity;
use crate::inbound::http::state::HttpState;

/// Names accepted in the `operation` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum OperationName {
    PersonCount,
    AllPersons,
    FindPerson,
    Me,
    AllUsers,
    AddPerson,
    EditNumber,
    CreateUser,
    Login,
    AddAsFriend,
}

impl OperationName {
    /// Wire name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PersonCount => "personCount",
            Self::AllPersons => "allPersons",
            Self::FindPerson => "findPerson",
            Self::Me => "me",
            Self::AllUsers => "allUsers",
            Self::AddPerson => "addPerson",
            Self::EditNumber => "editNumber",
            Self::CreateUser => "createUser",
            Self::Login => "login",
            Self::AddAsFriend => "addAsFriend",
        }
    }
}

fn empty_arguments() -> Value {
    Value::Object(Map::new())
}

/// Request body for `POST /api/v1/operations`.
///
/// Example JSON:
/// `{"operation":"login","arguments":{"username":"alice","password":"secret"}}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct OperationEnvelope {
    pub operation: OperationName,
    #[serde(default = "empty_arguments")]
    #[schema(value_type = Object)]
    pub arguments: Value,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AllPersonsArgs {
    #[schema(value_type = Option<String>, example = "PRESENT")]
    pub phone: Option<PhonePresence>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddPersonArgs {
    pub name: String,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct EditNumberArgs {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserArgs {
    pub username: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
}

/// A decoded operation with typed arguments.
pub enum OperationRequest {
    PersonCount,
    AllPersons(AllPersonsArgs),
    FindPerson(NameArgs),
    Me,
    AllUsers,
    AddPerson(AddPersonArgs),
    EditNumber(EditNumberArgs),
    CreateUser(CreateUserArgs),
    Login(LoginArgs),
    AddAsFriend(NameArgs),
}

impl OperationRequest {
    /// Decode the arguments for `name`.
    ///
    /// Argument-less operations ignore `arguments`.
    pub fn decode(name: OperationName, arguments: Value) -> Result<Self, Error> {
        Ok(match name {
            OperationName::PersonCount => Self::PersonCount,
            OperationName::AllPersons => Self::AllPersons(decode_args(name, arguments)?),
            OperationName::FindPerson => Self::FindPerson(decode_args(name, arguments)?),
            OperationName::Me => Self::Me,
            OperationName::AllUsers => Self::AllUsers,
            OperationName::AddPerson => Self::AddPerson(decode_args(name, arguments)?),
            OperationName::EditNumber => Self::EditNumber(decode_args(name, arguments)?),
            OperationName::CreateUser => Self::CreateUser(decode_args(name, arguments)?),
            OperationName::Login => Self::Login(decode_args(name, arguments)?),
            OperationName::AddAsFriend => Self::AddAsFriend(decode_args(name, arguments)?),
        })
    }
}

fn decode_args<T: DeserializeOwned>(name: OperationName, arguments: Value) -> Result<T, Error> {
    serde_json::from_value(arguments).map_err(|err| {
        let mut details = json!({ "operation": name.as_str() });
        // Decoder messages may quote raw values; never echo a password.
        if name != OperationName::Login {
            details["reason"] = Value::from(err.to_string());
        }
        Error::invalid_request(format!("invalid arguments for {}", name.as_str()))
            .with_details(details)
    })
}

/// Derived address of a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub street: String,
    pub city: String,
}

/// Directory entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonResponse {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
    pub address: AddressResponse,
}

impl From<&Person> for PersonResponse {
    fn from(person: &Person) -> Self {
        let address = person.address();
        Self {
            id: person.id().to_string(),
            name: person.name().to_string(),
            phone: person.phone().map(ToString::to_string),
            street: person.street().to_string(),
            city: person.city().to_string(),
            address: AddressResponse {
                street: address.street.to_owned(),
                city: address.city.to_owned(),
            },
        }
    }
}

/// User with friends resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub friends: Vec<PersonResponse>,
}

impl From<&UserProfile> for UserResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.user().id().to_string(),
            username: profile.user().username().to_string(),
            friends: profile.friends().iter().map(PersonResponse::from).collect(),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        // Only used for freshly created users, whose friends list is empty.
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            friends: Vec::new(),
        }
    }
}

/// Signed credential returned by `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub value: String,
}

impl From<Credential> for TokenResponse {
    fn from(credential: Credential) -> Self {
        Self {
            value: credential.as_str().to_owned(),
        }
    }
}

/// Result payload of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationData {
    Count(usize),
    Person(Option<PersonResponse>),
    Persons(Vec<PersonResponse>),
    User(Option<UserResponse>),
    Users(Vec<UserResponse>),
    Token(TokenResponse),
}

/// Response body for `POST /api/v1/operations`.
#[derive(Debug, Serialize, ToSchema)]
pub struct OperationResponse {
    #[schema(value_type = Object)]
    pub data: OperationData,
}

/// Execute one directory operation.
#[utoipa::path(
    post,
    path = "/api/v1/operations",
    request_body = OperationEnvelope,
    params(
        ("Authorization" = Option<String>, Header, description = "Bearer credential issued by login")
    ),
    responses(
        (status = 200, description = "Operation result", body = OperationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Authentication required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["directory"],
    operation_id = "executeOperation"
)]
#[post("/operations")]
pub async fn execute_operation(
    state: web::Data<HttpState>,
    identity: RequestIdentity,
    payload: web::Json<OperationEnvelope>,
) -> ApiResult<HttpResponse> {
    let OperationEnvelope {
        operation,
        arguments,
    } = payload.into_inner();
    let ctx = identity.into_inner();
    debug!(
        operation = operation.as_str(),
        authenticated = ctx.session().current_user().is_some(),
        "dispatching operation"
    );

    let request = OperationRequest::decode(operation, arguments)?;
    let data = dispatch(&state, &ctx, request).await?;
    Ok(HttpResponse::Ok().json(OperationResponse { data }))
}

/// Route a decoded request to its handler.
pub async fn dispatch(
    state: &HttpState,
    ctx: &RequestContext,
    request: OperationRequest,
) -> Result<OperationData, Error> {
    match request {
        OperationRequest::PersonCount => person_count(state, ctx).await,
        OperationRequest::AllPersons(args) => all_persons(state, ctx, args).await,
        OperationRequest::FindPerson(args) => find_person(state, ctx, args).await,
        OperationRequest::Me => me(state, ctx).await,
        OperationRequest::AllUsers => all_users(state, ctx).await,
        OperationRequest::AddPerson(args) => add_person(state, ctx, args).await,
        OperationRequest::EditNumber(args) => edit_number(state, ctx, args).await,
        OperationRequest::CreateUser(args) => create_user(state, ctx, args).await,
        OperationRequest::Login(args) => login(state, ctx, args).await,
        OperationRequest::AddAsFriend(args) => add_as_friend(state, ctx, args).await,
    }
}

async fn person_count(state: &HttpState, ctx: &RequestContext) -> Result<OperationData, Error> {
    state.queries.person_count(ctx).await.map(OperationData::Count)
}

async fn all_persons(
    state: &HttpState,
    ctx: &RequestContext,
    args: AllPersonsArgs,
) -> Result<OperationData, Error> {
    let persons = state.queries.all_persons(ctx, args.phone).await?;
    Ok(OperationData::Persons(
        persons.iter().map(PersonResponse::from).collect(),
    ))
}

async fn find_person(
    state: &HttpState,
    ctx: &RequestContext,
    args: NameArgs,
) -> Result<OperationData, Error> {
    let person = state.queries.find_person(ctx, &args.name).await?;
    Ok(OperationData::Person(person.as_ref().map(PersonResponse::from)))
}

async fn me(state: &HttpState, ctx: &RequestContext) -> Result<OperationData, Error> {
    let profile = state.queries.me(ctx).await?;
    Ok(OperationData::User(profile.as_ref().map(UserResponse::from)))
}

async fn all_users(state: &HttpState, ctx: &RequestContext) -> Result<OperationData, Error> {
    let profiles = state.queries.all_users(ctx).await?;
    Ok(OperationData::Users(
        profiles.iter().map(UserResponse::from).collect(),
    ))
}

async fn add_person(
    state: &HttpState,
    ctx: &RequestContext,
    args: AddPersonArgs,
) -> Result<OperationData, Error> {
    let AddPersonArgs {
        name,
        phone,
        street,
        city,
    } = args;
    let request = AddPersonRequest {
        name,
        phone,
        street,
        city,
    };
    let person = state.commands.add_person(ctx, request).await?;
    Ok(OperationData::Person(Some(PersonResponse::from(&person))))
}

async fn edit_number(
    state: &HttpState,
    ctx: &RequestContext,
    args: EditNumberArgs,
) -> Result<OperationData, Error> {
    let person = state
        .commands
        .edit_number(ctx, &args.name, &args.phone)
        .await?;
    Ok(OperationData::Person(person.as_ref().map(PersonResponse::from)))
}

async fn create_user(
    state: &HttpState,
    ctx: &RequestContext,
    args: CreateUserArgs,
) -> Result<OperationData, Error> {
    let user = state.commands.create_user(ctx, &args.username).await?;
    Ok(OperationData::User(Some(UserResponse::from(&user))))
}

async fn login(
    state: &HttpState,
    ctx: &RequestContext,
    args: LoginArgs,
) -> Result<OperationData, Error> {
    let credentials =
        LoginCredentials::try_from_parts(&args.username, &args.password).map_err(|err| {
            login_validation(&err, invalid_args([("username", Some(args.username.as_str()))]))
        })?;
    let credential = state.commands.login(ctx, &credentials).await?;
    Ok(OperationData::Token(TokenResponse::from(credential)))
}

async fn add_as_friend(
    state: &HttpState,
    ctx: &RequestContext,
    args: NameArgs,
) -> Result<OperationData, Error> {
    let profile = state.commands.add_as_friend(ctx, &args.name).await?;
    Ok(OperationData::User(Some(UserResponse::from(&profile))))
}
