use actix_web::{
    FromRequest, HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite},
    dev::Payload,
    http::header,
};
use futures::future::{Ready, ready};
use serde::Serialize;

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn tag(&self) -> &'static str {
        match self {
            FlashKind::Success => "s",
            FlashKind::Error => "e",
        }
    }
}

/// One-shot message set before a redirect and shown by the next page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        format!("{}:{}", self.kind.tag(), urlencoding::encode(&self.message))
    }

    fn decode(raw: &str) -> Option<Self> {
        let (tag, message) = raw.split_once(':')?;
        let kind = match tag {
            "s" => FlashKind::Success,
            "e" => FlashKind::Error,
            _ => return None,
        };
        let message = urlencoding::decode(message).ok()?.into_owned();
        Some(Self { kind, message })
    }
}

/// Flash message read from the incoming request, if any.
pub struct IncomingFlash(pub Option<Flash>);

impl FromRequest for IncomingFlash {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let flash = req
            .cookie(FLASH_COOKIE)
            .and_then(|c| Flash::decode(c.value()));
        ready(Ok(IncomingFlash(flash)))
    }
}

fn cookie(value: String) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// `302 Found` to `location`, carrying `flash` for the next page.
pub fn redirect(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .cookie(cookie(flash.encode()))
        .finish()
}

/// Drops the flash cookie once the message has been displayed.
pub fn consume(resp: &mut HttpResponse) {
    let mut removal = cookie(String::new());
    removal.make_removal();
    if let Err(e) = resp.add_cookie(&removal) {
        tracing::warn!(error = %e, "Failed to clear flash cookie");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn accented_messages_survive_the_cookie() {
        let flash = Flash::success("Le poste Ingénieur a été créé avec succès !");
        let encoded = flash.encode();
        assert!(encoded.is_ascii());
        assert!(!encoded.contains(';'));
        assert_eq!(Flash::decode(&encoded), Some(flash));
    }

    #[test]
    fn garbage_cookie_is_ignored() {
        assert_eq!(Flash::decode("no-separator"), None);
        assert_eq!(Flash::decode("x:hello"), None);
    }

    #[test]
    fn redirect_sets_location_and_cookie() {
        let resp = redirect("/poste", Flash::error("Poste non trouvé"));
        assert_eq!(resp.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/poste");

        let set = resp.cookies().find(|c| c.name() == FLASH_COOKIE).unwrap();
        assert_eq!(
            Flash::decode(set.value()),
            Some(Flash::error("Poste non trouvé"))
        );
    }

    #[actix_web::test]
    async fn extractor_reads_the_cookie() {
        let req = TestRequest::default()
            .cookie(cookie(Flash::success("ok").encode()))
            .to_http_request();
        let IncomingFlash(flash) = IncomingFlash::extract(&req).await.unwrap();
        assert_eq!(flash, Some(Flash::success("ok")));

        let req = TestRequest::default().to_http_request();
        let IncomingFlash(flash) = IncomingFlash::extract(&req).await.unwrap();
        assert!(flash.is_none());
    }
}
