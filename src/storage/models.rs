use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrl {
    pub id: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 一次跳转的访问记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub url_id: String,
    pub ip: String,
    pub referer: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

/// Visitor details captured by the redirect handler. Storage stamps the
/// owning id and the time when the visit is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVisit {
    pub ip: String,
    pub referer: String,
    pub user_agent: String,
}

impl NewVisit {
    pub fn into_visit(self, url_id: &str, created_at: DateTime<Utc>) -> Visit {
        Visit {
            url_id: url_id.to_string(),
            ip: self.ip,
            referer: self.referer,
            user_agent: self.user_agent,
            created_at,
        }
    }
}
