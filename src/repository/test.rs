use std::cell::RefCell;
use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::domain::category::{Category, NewCategory};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::recommendation::{
    Book, NaturalKey, NewBook, NewVideo, NewWebsite, RecommendationRef, RecommendationSummary,
    Scored, Video, Website,
};
use crate::domain::subcategory::{NewSubcategory, Subcategory};
use crate::domain::types::{
    BookId, CategoryId, CommentId, CommentText, RecommendationKind, SubcategoryId, UserId, VideoId,
    VoteDirection, WebsiteId,
};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BookReader, BookWriter, BookmarkReader, BookmarkWriter, CategoryReader, CategoryWriter,
    CommentReader, CommentWriter, RecommendationListQuery, RecommendationReader,
    RecommendationWriter, SubcategoryReader, SubcategoryWriter, UserReader, UserWriter,
    VideoReader, VideoWriter, VoteReader, VoteWriter, WebsiteReader, WebsiteWriter, sort_by_votes,
    sort_newest_first,
};

/// Simple in-memory repository used for unit tests.
///
/// Engagement state sits behind `RefCell` so the `&self` trait methods can
/// mutate it; unit tests are single-threaded.
#[derive(Default)]
pub struct TestRepository {
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    users: RefCell<Vec<User>>,
    websites: RefCell<Vec<Website>>,
    books: RefCell<Vec<Book>>,
    videos: RefCell<Vec<Video>>,
    votes: RefCell<HashMap<(RecommendationRef, UserId), VoteDirection>>,
    bookmarks: RefCell<Vec<(RecommendationRef, UserId)>>,
    comments: RefCell<Vec<Comment>>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>, subcategories: Vec<Subcategory>) -> Self {
        Self {
            categories,
            subcategories,
            ..Self::default()
        }
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.users.replace(users);
        self
    }

    pub fn with_websites(self, websites: Vec<Website>) -> Self {
        self.websites.replace(websites);
        self
    }

    pub fn with_books(self, books: Vec<Book>) -> Self {
        self.books.replace(books);
        self
    }

    pub fn with_videos(self, videos: Vec<Video>) -> Self {
        self.videos.replace(videos);
        self
    }

    pub fn with_votes(self, votes: Vec<(RecommendationRef, UserId, VoteDirection)>) -> Self {
        self.votes.replace(
            votes
                .into_iter()
                .map(|(rec, user_id, direction)| ((rec, user_id), direction))
                .collect(),
        );
        self
    }

    pub fn with_bookmarks(self, bookmarks: Vec<(RecommendationRef, UserId)>) -> Self {
        self.bookmarks.replace(bookmarks);
        self
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        self.comments.replace(comments);
        self
    }

    fn vote_total(&self, rec: RecommendationRef) -> i64 {
        self.votes
            .borrow()
            .iter()
            .filter(|((r, _), _)| *r == rec)
            .map(|(_, direction)| match direction {
                VoteDirection::Up => 1,
                VoteDirection::Down => -1,
            })
            .sum()
    }

    fn list_scored<T: Clone>(
        &self,
        rows: &[T],
        query: &RecommendationListQuery,
        subcategory_id: impl Fn(&T) -> SubcategoryId,
        rec: impl Fn(&T) -> RecommendationRef,
        matches: impl Fn(&T, &str) -> bool,
        key: impl Fn(&T) -> (NaiveDateTime, i32) + Copy,
    ) -> Vec<Scored<T>> {
        let keyword = query.search.as_deref().map(str::to_lowercase);
        let mut items: Vec<Scored<T>> = rows
            .iter()
            .filter(|row| subcategory_id(row) == query.subcategory_id)
            .filter(|row| match &keyword {
                Some(keyword) => matches(row, keyword),
                None => match query.filter.window(query.now) {
                    Some((start, end)) => {
                        let (created_at, _) = key(row);
                        created_at >= start && created_at < end
                    }
                    None => true,
                },
            })
            .map(|row| Scored {
                total_votes: self.vote_total(rec(row)),
                item: row.clone(),
            })
            .collect();
        if query.search.is_none() && query.filter.ranks_by_votes() {
            sort_by_votes(&mut items, key);
        } else {
            sort_newest_first(&mut items, key);
        }
        items
    }

    fn summarize(&self, rec: RecommendationRef) -> Option<RecommendationSummary> {
        let (subcategory_id, recommended_by, title, image_url, created_at) = match rec.kind {
            RecommendationKind::Website => {
                let websites = self.websites.borrow();
                let w = websites.iter().find(|w| w.id == rec.id)?;
                (
                    w.subcategory_id,
                    w.recommended_by,
                    w.title.clone(),
                    w.image_url.clone(),
                    w.created_at,
                )
            }
            RecommendationKind::Book => {
                let books = self.books.borrow();
                let b = books.iter().find(|b| b.id == rec.id)?;
                (
                    b.subcategory_id,
                    b.recommended_by,
                    b.title.clone(),
                    b.image_url.clone(),
                    b.created_at,
                )
            }
            RecommendationKind::Video => {
                let videos = self.videos.borrow();
                let v = videos.iter().find(|v| v.id == rec.id)?;
                (
                    v.subcategory_id,
                    v.recommended_by,
                    v.title.clone(),
                    v.image_url.clone(),
                    v.created_at,
                )
            }
        };
        let subcategory = self.subcategories.iter().find(|s| s.id == subcategory_id)?;
        let category = self
            .categories
            .iter()
            .find(|c| c.id == subcategory.category_id)?;
        Some(RecommendationSummary {
            kind: rec.kind,
            id: rec.id,
            recommended_by,
            title,
            category_slug: category.slug.clone(),
            subcategory_slug: subcategory.slug.clone(),
            image_url,
            created_at,
        })
    }
}

impl UserReader for TestRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.users.borrow().iter().find(|u| u.id == id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }
}

impl UserWriter for TestRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<usize> {
        let mut users = self.users.borrow_mut();
        let next = users.iter().map(|u| u.id.get()).max().unwrap_or(0) + 1;
        users.push(User {
            id: UserId::new(next)?,
            username: user.username.clone(),
            email: user.email.clone(),
            joined_at: user.joined_at,
        });
        Ok(1)
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.slug == slug).cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, _category: &NewCategory) -> RepositoryResult<usize> {
        Ok(1)
    }
}

impl SubcategoryReader for TestRepository {
    fn list_subcategories(&self, category_id: CategoryId) -> RepositoryResult<Vec<Subcategory>> {
        let mut subcategories: Vec<Subcategory> = self
            .subcategories
            .iter()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect();
        subcategories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subcategories)
    }

    fn get_subcategory_by_slug(
        &self,
        category_id: CategoryId,
        slug: &str,
    ) -> RepositoryResult<Option<Subcategory>> {
        Ok(self
            .subcategories
            .iter()
            .find(|s| s.category_id == category_id && s.slug == slug)
            .cloned())
    }
}

impl SubcategoryWriter for TestRepository {
    fn create_subcategory(&self, _subcategory: &NewSubcategory) -> RepositoryResult<usize> {
        Ok(1)
    }
}

impl WebsiteReader for TestRepository {
    fn list_websites(
        &self,
        query: &RecommendationListQuery,
    ) -> RepositoryResult<Vec<Scored<Website>>> {
        let websites = self.websites.borrow();
        Ok(self.list_scored(
            &websites,
            query,
            |w| w.subcategory_id,
            |w| w.id.into(),
            |w, keyword| {
                w.title.as_str().to_lowercase().contains(keyword)
                    || w.description.as_str().to_lowercase().contains(keyword)
            },
            |w| (w.created_at, w.id.get()),
        ))
    }

    fn get_website_by_id(&self, id: WebsiteId) -> RepositoryResult<Option<Website>> {
        Ok(self.websites.borrow().iter().find(|w| w.id == id).cloned())
    }
}

impl WebsiteWriter for TestRepository {
    fn create_website(&self, website: &NewWebsite) -> RepositoryResult<usize> {
        let mut websites = self.websites.borrow_mut();
        let next = websites.iter().map(|w| w.id.get()).max().unwrap_or(0) + 1;
        websites.push(Website {
            id: WebsiteId::new(next)?,
            category_id: website.category_id,
            subcategory_id: website.subcategory_id,
            recommended_by: website.recommended_by,
            title: website.title.clone(),
            description: website.description.clone(),
            url: website.url.clone(),
            image_url: website.image_url.clone(),
            created_at: website.created_at,
        });
        Ok(1)
    }
}

impl BookReader for TestRepository {
    fn list_books(&self, query: &RecommendationListQuery) -> RepositoryResult<Vec<Scored<Book>>> {
        let books = self.books.borrow();
        Ok(self.list_scored(
            &books,
            query,
            |b| b.subcategory_id,
            |b| b.id.into(),
            |b, keyword| {
                b.title.as_str().to_lowercase().contains(keyword)
                    || b.description.to_lowercase().contains(keyword)
            },
            |b| (b.created_at, b.id.get()),
        ))
    }

    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>> {
        Ok(self.books.borrow().iter().find(|b| b.id == id).cloned())
    }
}

impl BookWriter for TestRepository {
    fn create_book(&self, book: &NewBook) -> RepositoryResult<usize> {
        let mut books = self.books.borrow_mut();
        let next = books.iter().map(|b| b.id.get()).max().unwrap_or(0) + 1;
        books.push(Book {
            id: BookId::new(next)?,
            category_id: book.category_id,
            subcategory_id: book.subcategory_id,
            recommended_by: book.recommended_by,
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            url: book.url.clone(),
            image_url: book.image_url.clone(),
            publish_date: book.publish_date,
            created_at: book.created_at,
        });
        Ok(1)
    }
}

impl VideoReader for TestRepository {
    fn list_videos(
        &self,
        query: &RecommendationListQuery,
    ) -> RepositoryResult<Vec<Scored<Video>>> {
        let videos = self.videos.borrow();
        Ok(self.list_scored(
            &videos,
            query,
            |v| v.subcategory_id,
            |v| v.id.into(),
            |v, keyword| {
                v.title.as_str().to_lowercase().contains(keyword)
                    || v.description.to_lowercase().contains(keyword)
            },
            |v| (v.created_at, v.id.get()),
        ))
    }

    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        Ok(self.videos.borrow().iter().find(|v| v.id == id).cloned())
    }
}

impl VideoWriter for TestRepository {
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<usize> {
        let mut videos = self.videos.borrow_mut();
        let next = videos.iter().map(|v| v.id.get()).max().unwrap_or(0) + 1;
        videos.push(Video {
            id: VideoId::new(next)?,
            category_id: video.category_id,
            subcategory_id: video.subcategory_id,
            recommended_by: video.recommended_by,
            youtube_id: video.youtube_id.clone(),
            title: video.title.clone(),
            description: video.description.clone(),
            url: video.url.clone(),
            image_url: video.image_url.clone(),
            published_at: video.published_at,
            created_at: video.created_at,
        });
        Ok(1)
    }
}

impl RecommendationReader for TestRepository {
    fn natural_key_exists(
        &self,
        category_id: CategoryId,
        subcategory_id: SubcategoryId,
        key: &NaturalKey,
    ) -> RepositoryResult<bool> {
        let exists = match key {
            NaturalKey::Url(url) => self.websites.borrow().iter().any(|w| {
                w.category_id == category_id && w.subcategory_id == subcategory_id && w.url == *url
            }),
            NaturalKey::Isbn(isbn) => self.books.borrow().iter().any(|b| {
                b.category_id == category_id
                    && b.subcategory_id == subcategory_id
                    && b.isbn == *isbn
            }),
            NaturalKey::Video(youtube_id) => self.videos.borrow().iter().any(|v| {
                v.category_id == category_id
                    && v.subcategory_id == subcategory_id
                    && v.youtube_id == *youtube_id
            }),
        };
        Ok(exists)
    }

    fn get_recommendation_summary(
        &self,
        rec: RecommendationRef,
    ) -> RepositoryResult<Option<RecommendationSummary>> {
        Ok(self.summarize(rec))
    }

    fn list_recommendations_by_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<RecommendationSummary>> {
        let mut refs: Vec<RecommendationRef> = Vec::new();
        refs.extend(
            self.websites
                .borrow()
                .iter()
                .filter(|w| w.recommended_by == user_id)
                .map(|w| RecommendationRef::from(w.id)),
        );
        refs.extend(
            self.books
                .borrow()
                .iter()
                .filter(|b| b.recommended_by == user_id)
                .map(|b| RecommendationRef::from(b.id)),
        );
        refs.extend(
            self.videos
                .borrow()
                .iter()
                .filter(|v| v.recommended_by == user_id)
                .map(|v| RecommendationRef::from(v.id)),
        );
        let mut summaries: Vec<RecommendationSummary> = refs
            .into_iter()
            .filter_map(|rec| self.summarize(rec))
            .collect();
        summaries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(summaries)
    }

    fn list_bookmarks_by_user(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<RecommendationSummary>> {
        let mut summaries: Vec<RecommendationSummary> = self
            .bookmarks
            .borrow()
            .iter()
            .filter(|(_, u)| *u == user_id)
            .filter_map(|(rec, _)| self.summarize(*rec))
            .collect();
        summaries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(summaries)
    }
}

impl RecommendationWriter for TestRepository {
    fn delete_recommendation(
        &self,
        rec: RecommendationRef,
        recommended_by: UserId,
    ) -> RepositoryResult<usize> {
        let removed = match rec.kind {
            RecommendationKind::Website => {
                let mut websites = self.websites.borrow_mut();
                let before = websites.len();
                websites.retain(|w| !(w.id == rec.id && w.recommended_by == recommended_by));
                before - websites.len()
            }
            RecommendationKind::Book => {
                let mut books = self.books.borrow_mut();
                let before = books.len();
                books.retain(|b| !(b.id == rec.id && b.recommended_by == recommended_by));
                before - books.len()
            }
            RecommendationKind::Video => {
                let mut videos = self.videos.borrow_mut();
                let before = videos.len();
                videos.retain(|v| !(v.id == rec.id && v.recommended_by == recommended_by));
                before - videos.len()
            }
        };
        if removed > 0 {
            self.votes.borrow_mut().retain(|(r, _), _| *r != rec);
            self.bookmarks.borrow_mut().retain(|(r, _)| *r != rec);
            self.comments.borrow_mut().retain(|c| c.recommendation != rec);
        }
        Ok(removed)
    }
}

impl VoteReader for TestRepository {
    fn total_votes(&self, rec: RecommendationRef) -> RepositoryResult<i64> {
        Ok(self.vote_total(rec))
    }

    fn user_vote(
        &self,
        rec: RecommendationRef,
        user_id: UserId,
    ) -> RepositoryResult<Option<VoteDirection>> {
        Ok(self.votes.borrow().get(&(rec, user_id)).copied())
    }
}

impl VoteWriter for TestRepository {
    fn toggle_vote(
        &self,
        rec: RecommendationRef,
        user_id: UserId,
        direction: VoteDirection,
    ) -> RepositoryResult<i64> {
        {
            let mut votes = self.votes.borrow_mut();
            match votes.get(&(rec, user_id)) {
                Some(current) if *current == direction => {
                    votes.remove(&(rec, user_id));
                }
                _ => {
                    votes.insert((rec, user_id), direction);
                }
            }
        }
        Ok(self.vote_total(rec))
    }
}

impl BookmarkReader for TestRepository {
    fn is_bookmarked(&self, rec: RecommendationRef, user_id: UserId) -> RepositoryResult<bool> {
        Ok(self
            .bookmarks
            .borrow()
            .iter()
            .any(|(r, u)| *r == rec && *u == user_id))
    }
}

impl BookmarkWriter for TestRepository {
    fn toggle_bookmark(&self, rec: RecommendationRef, user_id: UserId) -> RepositoryResult<bool> {
        let mut bookmarks = self.bookmarks.borrow_mut();
        let before = bookmarks.len();
        bookmarks.retain(|(r, u)| !(*r == rec && *u == user_id));
        if bookmarks.len() < before {
            return Ok(false);
        }
        bookmarks.push((rec, user_id));
        Ok(true)
    }
}

impl CommentReader for TestRepository {
    fn list_comments(&self, rec: RecommendationRef) -> RepositoryResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .borrow()
            .iter()
            .filter(|c| c.recommendation == rec)
            .cloned()
            .collect();
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(comments)
    }

    fn get_comment_by_id(
        &self,
        kind: RecommendationKind,
        id: CommentId,
    ) -> RepositoryResult<Option<Comment>> {
        Ok(self
            .comments
            .borrow()
            .iter()
            .find(|c| c.recommendation.kind == kind && c.id == id)
            .cloned())
    }
}

impl CommentWriter for TestRepository {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<usize> {
        let author_username = self
            .get_user_by_id(comment.author_id)?
            .ok_or(RepositoryError::NotFound)?
            .username;
        let mut comments = self.comments.borrow_mut();
        let next = comments.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1;
        comments.push(Comment {
            id: CommentId::new(next)?,
            recommendation: comment.recommendation,
            author_id: comment.author_id,
            author_username,
            text: comment.text.clone(),
            created_at: comment.created_at,
        });
        Ok(1)
    }

    fn update_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
        author_id: UserId,
        text: &CommentText,
    ) -> RepositoryResult<usize> {
        let mut comments = self.comments.borrow_mut();
        match comments
            .iter_mut()
            .find(|c| c.recommendation.kind == kind && c.id == id && c.author_id == author_id)
        {
            Some(comment) => {
                comment.text = text.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
        author_id: UserId,
    ) -> RepositoryResult<usize> {
        let mut comments = self.comments.borrow_mut();
        let before = comments.len();
        comments
            .retain(|c| !(c.recommendation.kind == kind && c.id == id && c.author_id == author_id));
        Ok(before - comments.len())
    }
}
