use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use noobhub::domain::category::Category;
use noobhub::domain::comment::NewComment;
use noobhub::domain::recommendation::{
    NaturalKey, NewBook, NewVideo, NewWebsite, RecommendationRef, TimeFilter, Video, Website,
};
use noobhub::domain::subcategory::{NewSubcategory, Subcategory};
use noobhub::domain::types::{
    CommentText, Description, Isbn, RecommendationKind, SubcategoryName, Title, VideoUrl,
    VoteDirection, WebsiteUrl, YoutubeId,
};
use noobhub::domain::user::User;
use noobhub::repository::{
    BookWriter, BookmarkReader, BookmarkWriter, CommentReader, CommentWriter, DieselRepository,
    RecommendationListQuery, RecommendationReader, RecommendationWriter, SubcategoryReader,
    SubcategoryWriter, UserReader, VideoReader, VideoWriter, VoteReader, VoteWriter, WebsiteReader,
    WebsiteWriter,
};
use noobhub::schema::{website_bookmarks, website_comments, website_votes};

mod common;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn seed_website(
    repo: &DieselRepository,
    category: &Category,
    subcategory: &Subcategory,
    author: &User,
    title: &str,
    description: &str,
    url: &str,
    created_at: NaiveDateTime,
) -> Website {
    let new_website = NewWebsite {
        category_id: category.id,
        subcategory_id: subcategory.id,
        recommended_by: author.id,
        title: Title::new(title).expect("valid title"),
        description: Description::new(description).expect("valid description"),
        url: WebsiteUrl::new(url).expect("valid url"),
        image_url: None,
        created_at,
    };
    repo.create_website(&new_website)
        .expect("should create website");

    repo.list_websites(&RecommendationListQuery::new(subcategory.id).filter(TimeFilter::Newest))
        .expect("should list websites")
        .into_iter()
        .map(|scored| scored.item)
        .find(|website| website.url == new_website.url)
        .expect("created website should be listed")
}

fn seed_book(
    repo: &DieselRepository,
    category: &Category,
    subcategory: &Subcategory,
    author: &User,
    isbn: &str,
    title: &str,
    created_at: NaiveDateTime,
) {
    let new_book = NewBook {
        category_id: category.id,
        subcategory_id: subcategory.id,
        recommended_by: author.id,
        isbn: Isbn::new(isbn).expect("valid isbn"),
        title: Title::new(title).expect("valid title"),
        author: "Unknown".to_string(),
        description: format!("About {title}"),
        url: None,
        image_url: None,
        publish_date: None,
        created_at,
    };
    repo.create_book(&new_book).expect("should create book");
}

fn seed_video(
    repo: &DieselRepository,
    category: &Category,
    subcategory: &Subcategory,
    author: &User,
    youtube_id: &str,
    title: &str,
    created_at: NaiveDateTime,
) -> Video {
    let new_video = NewVideo {
        category_id: category.id,
        subcategory_id: subcategory.id,
        recommended_by: author.id,
        youtube_id: YoutubeId::new(youtube_id).expect("valid youtube id"),
        title: Title::new(title).expect("valid title"),
        description: format!("About {title}"),
        url: VideoUrl::new(format!("https://www.youtube.com/watch?v={youtube_id}"))
            .expect("valid video url"),
        image_url: None,
        published_at: None,
        created_at,
    };
    repo.create_video(&new_video).expect("should create video");

    repo.list_videos(&RecommendationListQuery::new(subcategory.id).filter(TimeFilter::Newest))
        .expect("should list videos")
        .into_iter()
        .map(|scored| scored.item)
        .find(|video| video.youtube_id == new_video.youtube_id)
        .expect("created video should be listed")
}

#[test]
fn user_roundtrip_by_id_and_username() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let alice = common::seed_user(&repo, "alice");
    let by_id = repo
        .get_user_by_id(alice.id)
        .expect("should read user")
        .expect("user should exist");
    assert_eq!(by_id.username.as_str(), "alice");
    assert_eq!(by_id.email, "alice@example.com");

    let missing = repo
        .get_user_by_username("nobody")
        .expect("should query missing user");
    assert!(missing.is_none());
}

#[test]
fn vote_toggle_walks_through_every_state() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");

    let website = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "The Book",
        "The official language book",
        "http://doc.rust-lang.org/book",
        at(2018, 1, 10),
    );
    let rec = RecommendationRef::from(website.id);

    assert_eq!(
        repo.toggle_vote(rec, alice.id, VoteDirection::Up)
            .expect("should vote"),
        1
    );
    assert_eq!(
        repo.user_vote(rec, alice.id).expect("should read vote"),
        Some(VoteDirection::Up)
    );

    // Voting the other way switches instead of stacking.
    assert_eq!(
        repo.toggle_vote(rec, alice.id, VoteDirection::Down)
            .expect("should vote"),
        -1
    );
    assert_eq!(
        repo.user_vote(rec, alice.id).expect("should read vote"),
        Some(VoteDirection::Down)
    );

    // Repeating the same direction removes the vote.
    assert_eq!(
        repo.toggle_vote(rec, alice.id, VoteDirection::Down)
            .expect("should vote"),
        0
    );
    assert_eq!(
        repo.user_vote(rec, alice.id).expect("should read vote"),
        None
    );

    assert_eq!(
        repo.toggle_vote(rec, alice.id, VoteDirection::Up)
            .expect("should vote"),
        1
    );
    assert_eq!(
        repo.toggle_vote(rec, bob.id, VoteDirection::Up)
            .expect("should vote"),
        2
    );
    assert_eq!(repo.total_votes(rec).expect("should total votes"), 2);
}

#[test]
fn ranked_listing_orders_by_votes_then_recency() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");

    let w_old = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Old favourite",
        "Been around forever",
        "http://old.example.com",
        at(2018, 1, 10),
    );
    let w_new = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "New favourite",
        "The fresh contender",
        "http://new.example.com",
        at(2018, 2, 10),
    );
    let w_single = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Single vote",
        "One fan so far",
        "http://single.example.com",
        at(2018, 3, 10),
    );

    for website in [&w_old, &w_new] {
        repo.toggle_vote(
            RecommendationRef::from(website.id),
            alice.id,
            VoteDirection::Up,
        )
        .expect("should vote");
        repo.toggle_vote(
            RecommendationRef::from(website.id),
            bob.id,
            VoteDirection::Up,
        )
        .expect("should vote");
    }
    repo.toggle_vote(
        RecommendationRef::from(w_single.id),
        alice.id,
        VoteDirection::Up,
    )
    .expect("should vote");

    // Equal totals break the tie towards the newer recommendation.
    let ranked = repo
        .list_websites(&RecommendationListQuery::new(subcategory.id))
        .expect("should list websites");
    let titles: Vec<&str> = ranked
        .iter()
        .map(|scored| scored.item.title.as_str())
        .collect();
    assert_eq!(titles, ["New favourite", "Old favourite", "Single vote"]);
    assert_eq!(ranked[0].total_votes, 2);
    assert_eq!(ranked[2].total_votes, 1);

    let newest = repo
        .list_websites(&RecommendationListQuery::new(subcategory.id).filter(TimeFilter::Newest))
        .expect("should list websites");
    let titles: Vec<&str> = newest
        .iter()
        .map(|scored| scored.item.title.as_str())
        .collect();
    assert_eq!(titles, ["Single vote", "New favourite", "Old favourite"]);
}

#[test]
fn calendar_windows_scope_the_ranked_listings() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");

    let now = at(2018, 6, 15);
    seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "In month",
        "Submitted this month",
        "http://june.example.com",
        at(2018, 6, 5),
    );
    seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "In year",
        "Submitted this spring",
        "http://march.example.com",
        at(2018, 3, 1),
    );
    seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Last year",
        "Submitted way back",
        "http://lastyear.example.com",
        at(2017, 12, 31),
    );

    let month = repo
        .list_websites(
            &RecommendationListQuery::new(subcategory.id)
                .filter(TimeFilter::BestOfMonth)
                .at(now),
        )
        .expect("should list websites");
    assert_eq!(month.len(), 1);
    assert_eq!(month[0].item.title.as_str(), "In month");

    let year = repo
        .list_websites(
            &RecommendationListQuery::new(subcategory.id)
                .filter(TimeFilter::BestOfYear)
                .at(now),
        )
        .expect("should list websites");
    let titles: Vec<&str> = year
        .iter()
        .map(|scored| scored.item.title.as_str())
        .collect();
    assert_eq!(titles, ["In month", "In year"]);

    let all = repo
        .list_websites(&RecommendationListQuery::new(subcategory.id).at(now))
        .expect("should list websites");
    assert_eq!(all.len(), 3);
}

#[test]
fn search_matches_titles_and_descriptions_across_all_time() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");

    seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Rust by Example",
        "Learn the language through annotated snippets",
        "http://rustbyexample.example.com",
        at(2017, 1, 1),
    );
    seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Idiomatic patterns",
        "A grab bag of rust idioms",
        "http://patterns.example.com",
        at(2018, 6, 5),
    );
    seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "The Go Blog",
        "Everything about Go",
        "http://goblog.example.com",
        at(2018, 6, 6),
    );

    // A search ignores the calendar window and is case-insensitive.
    let found = repo
        .list_websites(
            &RecommendationListQuery::new(subcategory.id)
                .filter(TimeFilter::BestOfMonth)
                .search("RUST")
                .at(at(2018, 6, 15)),
        )
        .expect("should search websites");
    let titles: Vec<&str> = found
        .iter()
        .map(|scored| scored.item.title.as_str())
        .collect();
    assert_eq!(titles, ["Idiomatic patterns", "Rust by Example"]);

    // Whitespace-only input means no search at all.
    let blank = repo
        .list_websites(
            &RecommendationListQuery::new(subcategory.id)
                .filter(TimeFilter::Newest)
                .search("   "),
        )
        .expect("should list websites");
    assert_eq!(blank.len(), 3);
}

#[test]
fn natural_keys_deduplicate_within_a_subcategory_only() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, sub_rust) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");

    let name = SubcategoryName::new("Python").expect("valid subcategory name");
    let new_subcategory = NewSubcategory::new(category.id, name, None).expect("valid subcategory");
    repo.create_subcategory(&new_subcategory)
        .expect("should create subcategory");
    let sub_python = repo
        .get_subcategory_by_slug(category.id, new_subcategory.slug.as_str())
        .expect("should read subcategory")
        .expect("created subcategory should exist");

    seed_website(
        &repo,
        &category,
        &sub_rust,
        &alice,
        "Test site",
        "A site for testing",
        "http://www.Test.com",
        at(2018, 1, 1),
    );

    // Website URLs are compared lowercased.
    let key = NaturalKey::Url(WebsiteUrl::new("HTTP://WWW.TEST.COM").expect("valid url"));
    assert!(
        repo.natural_key_exists(category.id, sub_rust.id, &key)
            .expect("should check key")
    );
    assert!(
        !repo
            .natural_key_exists(category.id, sub_python.id, &key)
            .expect("should check key")
    );

    seed_book(
        &repo,
        &category,
        &sub_rust,
        &alice,
        "9780134685991",
        "Effective Java",
        at(2018, 2, 1),
    );
    let key = NaturalKey::Isbn(Isbn::new("9780134685991").expect("valid isbn"));
    assert!(
        repo.natural_key_exists(category.id, sub_rust.id, &key)
            .expect("should check key")
    );
    assert!(
        !repo
            .natural_key_exists(category.id, sub_python.id, &key)
            .expect("should check key")
    );

    seed_video(
        &repo,
        &category,
        &sub_rust,
        &alice,
        "dQw4w9WgXcQ",
        "A classic",
        at(2018, 3, 1),
    );
    let key = NaturalKey::Video(YoutubeId::new("dQw4w9WgXcQ").expect("valid youtube id"));
    assert!(
        repo.natural_key_exists(category.id, sub_rust.id, &key)
            .expect("should check key")
    );
    assert!(
        !repo
            .natural_key_exists(category.id, sub_python.id, &key)
            .expect("should check key")
    );
}

#[test]
fn bookmark_toggle_roundtrip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");

    let website = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Worth keeping",
        "Bookmark material",
        "http://keeper.example.com",
        at(2018, 1, 10),
    );
    let rec = RecommendationRef::from(website.id);

    assert!(repo.toggle_bookmark(rec, bob.id).expect("should bookmark"));
    assert!(repo.is_bookmarked(rec, bob.id).expect("should read bookmark"));
    assert!(
        !repo
            .is_bookmarked(rec, alice.id)
            .expect("should read bookmark")
    );

    assert!(!repo.toggle_bookmark(rec, bob.id).expect("should bookmark"));
    assert!(
        !repo
            .is_bookmarked(rec, bob.id)
            .expect("should read bookmark")
    );
}

#[test]
fn comment_updates_and_deletes_are_scoped_to_the_author() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");

    let website = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Talked about",
        "Generates discussion",
        "http://discussed.example.com",
        at(2018, 1, 10),
    );
    let rec = RecommendationRef::from(website.id);

    repo.create_comment(&NewComment {
        recommendation: rec,
        author_id: alice.id,
        text: CommentText::new("First!").expect("valid text"),
        created_at: at(2018, 1, 11),
    })
    .expect("should create comment");
    repo.create_comment(&NewComment {
        recommendation: rec,
        author_id: bob.id,
        text: CommentText::new("Came here to say this").expect("valid text"),
        created_at: at(2018, 1, 12),
    })
    .expect("should create comment");

    let comments = repo.list_comments(rec).expect("should list comments");
    assert_eq!(comments.len(), 2);
    // Newest first, with the author joined in for display.
    assert_eq!(comments[0].author_username.as_str(), "bob");
    assert_eq!(comments[1].author_username.as_str(), "alice");

    let alices = comments[1].clone();
    let rewrite = CommentText::new("First! (edited)").expect("valid text");

    // Someone else's comment cannot be touched.
    assert_eq!(
        repo.update_comment(RecommendationKind::Website, alices.id, bob.id, &rewrite)
            .expect("should attempt update"),
        0
    );
    assert_eq!(
        repo.delete_comment(RecommendationKind::Website, alices.id, bob.id)
            .expect("should attempt delete"),
        0
    );

    assert_eq!(
        repo.update_comment(RecommendationKind::Website, alices.id, alice.id, &rewrite)
            .expect("should update comment"),
        1
    );
    let updated = repo
        .get_comment_by_id(RecommendationKind::Website, alices.id)
        .expect("should read comment")
        .expect("comment should exist");
    assert_eq!(updated.text.as_str(), "First! (edited)");

    assert_eq!(
        repo.delete_comment(RecommendationKind::Website, alices.id, alice.id)
            .expect("should delete comment"),
        1
    );
    assert_eq!(
        repo.list_comments(rec).expect("should list comments").len(),
        1
    );
}

#[test]
fn deleting_a_recommendation_cascades_and_checks_ownership() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");

    let website = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "Short lived",
        "Will not survive the test",
        "http://doomed.example.com",
        at(2018, 1, 10),
    );
    let rec = RecommendationRef::from(website.id);

    repo.toggle_vote(rec, alice.id, VoteDirection::Up)
        .expect("should vote");
    repo.toggle_vote(rec, bob.id, VoteDirection::Down)
        .expect("should vote");
    repo.toggle_bookmark(rec, bob.id).expect("should bookmark");
    repo.create_comment(&NewComment {
        recommendation: rec,
        author_id: bob.id,
        text: CommentText::new("Saving this").expect("valid text"),
        created_at: at(2018, 1, 11),
    })
    .expect("should create comment");

    // Only the recommending user may delete.
    assert_eq!(
        repo.delete_recommendation(rec, bob.id)
            .expect("should attempt delete"),
        0
    );
    assert!(
        repo.get_website_by_id(website.id)
            .expect("should read website")
            .is_some()
    );

    assert_eq!(
        repo.delete_recommendation(rec, alice.id)
            .expect("should delete"),
        1
    );
    assert!(
        repo.get_website_by_id(website.id)
            .expect("should read website")
            .is_none()
    );

    // Votes, bookmarks and comments went with the row.
    let mut conn = test_db.pool().get().expect("should acquire connection");
    let votes: i64 = website_votes::table
        .filter(website_votes::website_id.eq(website.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("should count votes");
    let bookmarks: i64 = website_bookmarks::table
        .filter(website_bookmarks::website_id.eq(website.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("should count bookmarks");
    let comments: i64 = website_comments::table
        .filter(website_comments::website_id.eq(website.id.get()))
        .count()
        .get_result(&mut conn)
        .expect("should count comments");
    assert_eq!((votes, bookmarks, comments), (0, 0, 0));
}

#[test]
fn profile_listings_merge_kinds_newest_first() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Programming", "Rust");
    let alice = common::seed_user(&repo, "alice");
    let bob = common::seed_user(&repo, "bob");

    let website = seed_website(
        &repo,
        &category,
        &subcategory,
        &alice,
        "A website",
        "The first submission",
        "http://first.example.com",
        at(2018, 1, 10),
    );
    seed_book(
        &repo,
        &category,
        &subcategory,
        &alice,
        "9780134685991",
        "A book",
        at(2018, 3, 10),
    );
    let video = seed_video(
        &repo,
        &category,
        &subcategory,
        &alice,
        "dQw4w9WgXcQ",
        "A video",
        at(2018, 2, 10),
    );

    let recommendations = repo
        .list_recommendations_by_user(alice.id)
        .expect("should list recommendations");
    let kinds: Vec<RecommendationKind> = recommendations.iter().map(|rec| rec.kind).collect();
    assert_eq!(
        kinds,
        [
            RecommendationKind::Book,
            RecommendationKind::Video,
            RecommendationKind::Website
        ]
    );
    assert_eq!(recommendations[0].title.as_str(), "A book");
    assert_eq!(
        recommendations[0].category_slug.as_str(),
        category.slug.as_str()
    );
    assert_eq!(
        recommendations[0].subcategory_slug.as_str(),
        subcategory.slug.as_str()
    );

    // Bookmarks merge the same way, scoped to the bookmarking user.
    repo.toggle_bookmark(RecommendationRef::from(website.id), bob.id)
        .expect("should bookmark");
    repo.toggle_bookmark(RecommendationRef::from(video.id), bob.id)
        .expect("should bookmark");

    let bookmarks = repo
        .list_bookmarks_by_user(bob.id)
        .expect("should list bookmarks");
    let kinds: Vec<RecommendationKind> = bookmarks.iter().map(|rec| rec.kind).collect();
    assert_eq!(
        kinds,
        [RecommendationKind::Video, RecommendationKind::Website]
    );
    assert!(
        repo.list_bookmarks_by_user(alice.id)
            .expect("should list bookmarks")
            .is_empty()
    );
}

#[test]
fn summaries_flatten_any_kind_with_its_board_slugs() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let (category, subcategory) = common::seed_board(&repo, "Web Development", "Front End");
    let alice = common::seed_user(&repo, "alice");

    let video = seed_video(
        &repo,
        &category,
        &subcategory,
        &alice,
        "M7lc1UVf-VE",
        "Player API deep dive",
        at(2018, 4, 1),
    );

    let summary = repo
        .get_recommendation_summary(RecommendationRef::from(video.id))
        .expect("should read summary")
        .expect("summary should exist");
    assert_eq!(summary.kind, RecommendationKind::Video);
    assert_eq!(summary.title.as_str(), "Player API deep dive");
    assert_eq!(summary.category_slug.as_str(), "web-development");
    assert_eq!(summary.subcategory_slug.as_str(), "front-end");
    assert_eq!(summary.recommended_by, alice.id);

    let missing = repo
        .get_recommendation_summary(RecommendationRef::new(RecommendationKind::Book, 12345))
        .expect("should query missing summary");
    assert!(missing.is_none());
}
