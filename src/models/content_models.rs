//! Records shared by the schedule and news forms.
//!
//! The `*FormValues` shapes are what a form submits before the record has an
//! identifier; [`ScheduleItemFormValues::into_item`] and
//! [`NewsArticleFormValues::into_article`] attach one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    pub id: String,
    pub day: String,
    pub time: String,
    pub show: String,
    pub dj: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScheduleItemFormValues {
    pub day: String,
    pub time: String,
    pub show: String,
    pub dj: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
    pub category: String,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticleFormValues {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
    pub category: String,
    pub date: String,
}

fn generated_id(id: Option<String>) -> String {
    id.unwrap_or_else(|| Uuid::new_v4().to_string())
}

impl ScheduleItemFormValues {
    pub fn into_item(self, id: Option<String>) -> ScheduleItem {
        ScheduleItem {
            id: generated_id(id),
            day: self.day,
            time: self.time,
            show: self.show,
            dj: self.dj,
        }
    }
}

impl From<ScheduleItem> for ScheduleItemFormValues {
    fn from(item: ScheduleItem) -> Self {
        Self {
            day: item.day,
            time: item.time,
            show: item.show,
            dj: item.dj,
        }
    }
}

impl NewsArticleFormValues {
    pub fn into_article(self, id: Option<String>) -> NewsArticle {
        NewsArticle {
            id: generated_id(id),
            title: self.title,
            summary: self.summary,
            content: self.content,
            image_url: self.image_url,
            category: self.category,
            date: self.date,
        }
    }
}

impl From<NewsArticle> for NewsArticleFormValues {
    fn from(article: NewsArticle) -> Self {
        Self {
            title: article.title,
            summary: article.summary,
            content: article.content,
            image_url: article.image_url,
            category: article.category,
            date: article.date,
        }
    }
}
