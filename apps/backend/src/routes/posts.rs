use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::claims::SubjectId;
use crate::error::FailureSignal;
use crate::extractors::{CurrentSubject, ValidatedJson};
use crate::http;
use crate::validation::time_layout::TimeLayout;
use crate::validation::{rules, FieldName, Rule, Validate, Violation, Violations};

pub const MAX_CONTENT_CHARS: usize = 280;

const CONTENT: FieldName = FieldName::new("content");
const PUBLISH_ON: FieldName = FieldName::new("publish_on");

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub publish_on: Option<String>,
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> Result<(), Vec<Violation>> {
        let mut v = Violations::new();
        if !rules::required(&self.content) {
            v.push(Violation::new(CONTENT, Rule::Required));
        } else {
            v.check(
                rules::max_chars(&self.content, MAX_CONTENT_CHARS),
                CONTENT,
                Rule::Max(MAX_CONTENT_CHARS.to_string()),
            );
        }
        if let Some(publish_on) = &self.publish_on {
            v.check(
                rules::required(publish_on),
                PUBLISH_ON,
                Rule::TimeFormat(TimeLayout::IsoDate),
            );
        }
        v.finish()
    }
}

#[derive(Debug, Serialize)]
struct PostDraft {
    author_id: SubjectId,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    publish_on: Option<String>,
}

async fn create_post(
    subject: CurrentSubject,
    body: ValidatedJson<CreatePostRequest>,
) -> Result<HttpResponse, FailureSignal> {
    let CreatePostRequest {
        content,
        publish_on,
    } = body.into_inner();

    let publish_on = publish_on
        .map(|raw| {
            let date = TimeLayout::IsoDate.parse_date(&raw)?;
            Ok::<_, FailureSignal>(TimeLayout::IsoDate.format_date(date).unwrap_or(raw))
        })
        .transpose()?;

    Ok(http::created(PostDraft {
        author_id: subject.id(),
        content,
        publish_on,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_post));
}
