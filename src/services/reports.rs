use crate::auth::AuthenticatedUser;
use crate::domain::recommendation::{RecommendationRef, RecommendationSummary};
use crate::mailer::{REPORT_SUBJECT, ReportMailer};
use crate::repository::RecommendationReader;

use super::ServiceResult;

/// Core business logic for rendering the report form.
pub fn show_report_form<R>(
    rec: RecommendationRef,
    category_slug: &str,
    subcategory_slug: &str,
    repo: &R,
) -> ServiceResult<RecommendationSummary>
where
    R: RecommendationReader,
{
    super::locate_recommendation(rec, category_slug, subcategory_slug, repo)
}

/// Core business logic for mailing a recommendation report to the site
/// moderators.
///
/// Returns the summary so the route can redirect back to the listing the
/// reported item lives on.
pub async fn send_report<R, M>(
    rec: RecommendationRef,
    category_slug: &str,
    subcategory_slug: &str,
    message: &str,
    user: &AuthenticatedUser,
    repo: &R,
    mailer: &M,
) -> ServiceResult<(RecommendationSummary, bool)>
where
    R: RecommendationReader,
    M: ReportMailer,
{
    let summary = super::locate_recommendation(rec, category_slug, subcategory_slug, repo)?;

    let body = format!(
        "{username} reported the {kind} recommendation \"{title}\" \
         in {category}/{subcategory}:\n\n{message}",
        username = user.username,
        kind = summary.kind,
        title = summary.title,
        category = summary.category_slug,
        subcategory = summary.subcategory_slug,
    );
    match mailer.send_report(REPORT_SUBJECT, &body).await {
        Ok(()) => Ok((summary, true)),
        Err(e) => {
            log::error!("Failed to send report: {e}");
            Ok((summary, false))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::recommendation::Website;
    use crate::domain::subcategory::Subcategory;
    use crate::domain::types::{
        CategoryId, CategoryName, Description, Slug, SubcategoryId, SubcategoryName, Title,
        UserId, WebsiteId, WebsiteUrl,
    };
    use crate::mailer::MailError;
    use crate::services::ServiceError;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;
    use std::cell::RefCell;

    #[derive(Default)]
    struct StubMailer {
        sent: RefCell<Vec<(String, String)>>,
    }

    impl ReportMailer for StubMailer {
        async fn send_report(&self, subject: &str, body: &str) -> Result<(), MailError> {
            self.sent
                .borrow_mut()
                .push((subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            username: "testuser1".into(),
            email: "test@example.com".into(),
            exp: 0,
        }
    }

    fn sample_repo() -> TestRepository {
        let created_at = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        TestRepository::new(
            vec![Category {
                id: CategoryId::new(1).unwrap(),
                name: CategoryName::new("Python").unwrap(),
                slug: Slug::new("python").unwrap(),
                image_url: None,
                created_at,
            }],
            vec![Subcategory {
                id: SubcategoryId::new(1).unwrap(),
                category_id: CategoryId::new(1).unwrap(),
                name: SubcategoryName::new("Django").unwrap(),
                slug: Slug::new("django").unwrap(),
                image_url: None,
                created_at,
            }],
        )
        .with_websites(vec![Website {
            id: WebsiteId::new(1).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            subcategory_id: SubcategoryId::new(1).unwrap(),
            recommended_by: UserId::new(1).unwrap(),
            title: Title::new("Django Docs").unwrap(),
            description: Description::new("The official documentation").unwrap(),
            url: WebsiteUrl::new("http://example.com").unwrap(),
            image_url: None,
            created_at,
        }])
    }

    fn website_rec(id: i32) -> RecommendationRef {
        RecommendationRef::from(WebsiteId::new(id).unwrap())
    }

    #[test]
    fn report_form_resolves_the_recommendation() {
        let repo = sample_repo();

        let summary = show_report_form(website_rec(1), "python", "django", &repo).unwrap();

        assert_eq!(summary.title.as_str(), "Django Docs");
    }

    #[test]
    fn report_form_checks_the_addressed_board() {
        let repo = sample_repo();

        let err = show_report_form(website_rec(1), "python", "flask", &repo).unwrap_err();

        assert!(matches!(err, ServiceError::NotFound));
    }

    #[actix_web::test]
    async fn sends_report_with_fixed_subject() {
        let repo = sample_repo();
        let mailer = StubMailer::default();
        let user = sample_user();

        let (summary, sent) = send_report(
            website_rec(1),
            "python",
            "django",
            "test report message",
            &user,
            &repo,
            &mailer,
        )
        .await
        .unwrap();

        assert!(sent);
        assert_eq!(summary.subcategory_slug, "django");
        let sent = mailer.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Noobhub recommendation report!");
        assert!(sent[0].1.contains("testuser1"));
        assert!(sent[0].1.contains("Django Docs"));
        assert!(sent[0].1.contains("test report message"));
    }

    #[actix_web::test]
    async fn reporting_missing_recommendation_is_not_found() {
        let repo = sample_repo();
        let mailer = StubMailer::default();
        let user = sample_user();

        let err = send_report(
            website_rec(9),
            "python",
            "django",
            "test report message",
            &user,
            &repo,
            &mailer,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound));
        assert!(mailer.sent.borrow().is_empty());
    }
}
