//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat
//! and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current
//! thread will cause the current worker to stop processing new requests. For this reason, any long,
//! non-cpu-bound operation (e.g. I/O, database operations, etc.) must be expressed as futures or
//! asynchronous functions. Async handlers get executed concurrently by worker threads and thus
//! don't block execution.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use pawpaw_engine::{
    db_types::{GiftKind, NewGift, NewProfile, NewSwipe},
    social_objects::MatchView,
    traits::{ProfileManagement, SocialGatewayDatabase, WalletManagement},
    ProfileApi,
    SwipeFlowApi,
    WalletApi,
};

use crate::{
    auth::JwtClaims,
    data_objects::{
        FeedParams,
        GiftRequest,
        GiftResponse,
        GiftView,
        JsonResponse,
        NewProfileRequest,
        ProfileResponse,
        SwipeRequest,
        SwipeResponse,
        WalletResponse,
    },
    errors::ServerError,
};

// Actix cannot handle generics in handlers, so the route registration is implemented manually
// using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("🐾️\n")
}

//----------------------------------------------  Profiles  ----------------------------------------------------
route!(create_profile => Post "/profile" impl ProfileManagement);
/// Creates the pet profile for the authenticated user. Each user owns exactly one profile; a
/// second create is a domain violation, not an upsert.
pub async fn create_profile<B: ProfileManagement>(
    claims: JwtClaims,
    api: web::Data<ProfileApi<B>>,
    body: web::Json<NewProfileRequest>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    let mut profile = NewProfile::new(claims.user_id(), req.name);
    if let Some(species) = req.species {
        profile = profile.with_species(species);
    }
    if let Some(bio) = req.bio {
        profile = profile.with_bio(bio);
    }
    if let Some(url) = req.photo_url {
        profile = profile.with_photo_url(url);
    }
    let created = api.create_profile(profile).await?;
    debug!("💻️ Created profile [{}] for user {}", created.id, created.owner_id);
    Ok(HttpResponse::Created().json(ProfileResponse::from(&created)))
}

route!(get_profile => Get "/profile/{id}" impl ProfileManagement);
pub async fn get_profile<B: ProfileManagement>(
    _claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<ProfileApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let profile_id = path.into_inner();
    let profile = api
        .profile(profile_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Pet profile {profile_id} does not exist")))?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(&profile)))
}

route!(delete_profile => Delete "/profile/{id}" impl ProfileManagement);
/// Deletes a pet profile. Only the owner may do this; the matching logic never deletes profiles.
pub async fn delete_profile<B: ProfileManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<ProfileApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let profile_id = path.into_inner();
    let profile = api
        .profile(profile_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Pet profile {profile_id} does not exist")))?;
    if profile.owner_id != claims.user_id() {
        return Err(ServerError::Forbidden("Only the pet's owner can delete its profile".to_string()));
    }
    api.delete_profile(profile_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Profile {profile_id} deleted"))))
}

route!(discovery_feed => Get "/feed" impl ProfileManagement);
/// The swipe deck: profiles the caller has not swiped on yet, newest first.
pub async fn discovery_feed<B: ProfileManagement>(
    claims: JwtClaims,
    params: web::Query<FeedParams>,
    api: web::Data<ProfileApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let feed = api.discovery_feed(claims.user_id(), params.limit).await?;
    let feed: Vec<ProfileResponse> = feed.iter().map(ProfileResponse::from).collect();
    Ok(HttpResponse::Ok().json(feed))
}

//----------------------------------------------   Swipes   ----------------------------------------------------
route!(record_swipe => Post "/swipe" impl SocialGatewayDatabase);
/// Records a swipe decision for the authenticated user.
///
/// The response carries `match` only when this swipe completed a mutual like. Expected domain
/// rejections — self-swipe, duplicate swipe, missing profile — surface as 4xx codes and are not
/// worth retrying.
pub async fn record_swipe<B: SocialGatewayDatabase>(
    claims: JwtClaims,
    api: web::Data<SwipeFlowApi<B>>,
    body: web::Json<SwipeRequest>,
) -> Result<HttpResponse, ServerError> {
    let user_id = claims.user_id();
    let req = body.into_inner();
    trace!("💻️ User {user_id} swiped {:?} on profile {}", req.decision, req.profile_id);
    let outcome = api.record_swipe(NewSwipe::new(user_id, req.profile_id, req.decision)).await?;
    let matched = outcome
        .matched
        .as_ref()
        .map(|details| MatchView::new(&details.record, Some(details.partner_profile_of(user_id))));
    Ok(HttpResponse::Ok().json(SwipeResponse { success: true, matched }))
}

route!(my_matches => Get "/matches" impl SocialGatewayDatabase);
/// The authenticated user's matches, newest first. This is the durable channel for match
/// discovery; the push event is only a convenience signal.
pub async fn my_matches<B: SocialGatewayDatabase>(
    claims: JwtClaims,
    api: web::Data<SwipeFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = claims.user_id();
    let records = api.matches_for_user(user_id).await?;
    let mut views = Vec::with_capacity(records.len());
    for record in records {
        let partner_profile = api.db().fetch_profile(record.partner_profile_of(user_id)).await?;
        views.push(MatchView::new(&record, partner_profile.as_ref()));
    }
    Ok(HttpResponse::Ok().json(views))
}

//----------------------------------------------   Wallet   ----------------------------------------------------
route!(my_wallet => Get "/wallet" impl WalletManagement);
/// The authenticated user's wallet, created with the default starting balance on first read.
pub async fn my_wallet<B: WalletManagement>(
    claims: JwtClaims,
    api: web::Data<WalletApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let wallet = api.wallet(claims.user_id()).await?;
    Ok(HttpResponse::Ok()
        .json(WalletResponse { balance: wallet.balance.value(), total_earned: wallet.total_earned.value() }))
}

route!(send_gift => Post "/gift" impl WalletManagement);
/// Sends a gift to another user. The kind is validated against the fixed catalogue *before* any
/// wallet is touched; `InsufficientFunds` is an expected outcome that leaves every balance as it
/// was.
pub async fn send_gift<B: WalletManagement>(
    claims: JwtClaims,
    api: web::Data<WalletApi<B>>,
    body: web::Json<GiftRequest>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    let kind = req.kind.parse::<GiftKind>().map_err(|e| ServerError::InvalidOperation(e.to_string()))?;
    let receipt = api.send_gift(NewGift::new(claims.user_id(), req.receiver_id, kind)).await?;
    debug!(
        "💻️ User {} sent a {} to user {}. New balance: {}",
        claims.user_id(),
        receipt.gift.kind,
        receipt.gift.receiver_id,
        receipt.new_sender_balance
    );
    Ok(HttpResponse::Ok().json(GiftResponse::from(&receipt)))
}

route!(my_gifts => Get "/gifts" impl WalletManagement);
/// Gifts the authenticated user has received, newest first.
pub async fn my_gifts<B: WalletManagement>(
    claims: JwtClaims,
    api: web::Data<WalletApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let gifts = api.gifts_received(claims.user_id()).await?;
    let gifts: Vec<GiftView> = gifts
        .iter()
        .map(|g| GiftView {
            id: g.id,
            sender_id: g.sender_id,
            kind: g.kind.to_string(),
            coin_value: g.coin_value.value(),
            sent_at: g.created_at,
        })
        .collect();
    Ok(HttpResponse::Ok().json(gifts))
}
