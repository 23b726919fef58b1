/// Database schema for the flashcard service.
///
/// Every statement is idempotent so the bootstrap can run on each start:
/// - unique constraints on user email and username
/// - foreign keys cascade from users to decks to flashcards
/// - weighted text-search indexes back the search endpoint

/// Rank weights for classes `{D, C, B, A}`. B counts half as much as A.
pub const RANK_WEIGHTS: &str = "{0.1, 0.2, 0.5, 1.0}";

/// SQL schema for users table
pub const USERS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(50) NOT NULL,
    email VARCHAR(255) NOT NULL,
    hashed_password TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_admin BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_users_email UNIQUE (email),
    CONSTRAINT uq_users_username UNIQUE (username)
);

CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at DESC);
"#;

/// SQL schema for decks table
pub const DECKS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS decks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    is_public BOOLEAN NOT NULL DEFAULT false,
    source_query TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT fk_decks_user FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    CONSTRAINT ck_decks_name_not_blank CHECK (btrim(name) <> '')
);

CREATE INDEX IF NOT EXISTS idx_decks_user_id ON decks(user_id);
CREATE INDEX IF NOT EXISTS idx_decks_is_public ON decks(is_public) WHERE is_public = true;
CREATE INDEX IF NOT EXISTS idx_decks_name ON decks(name);
CREATE INDEX IF NOT EXISTS idx_decks_created_at ON decks(created_at DESC);
"#;

/// SQL schema for flashcards table
pub const FLASHCARDS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS flashcards (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    deck_id UUID NOT NULL,
    user_id UUID NOT NULL,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT fk_flashcards_deck FOREIGN KEY (deck_id) REFERENCES decks(id) ON DELETE CASCADE,
    CONSTRAINT fk_flashcards_user FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    CONSTRAINT ck_flashcards_question_not_blank CHECK (btrim(question) <> ''),
    CONSTRAINT ck_flashcards_answer_not_blank CHECK (btrim(answer) <> '')
);

-- Composite index for the most frequent query: cards of a deck in insertion order
CREATE INDEX IF NOT EXISTS idx_flashcards_deck_created ON flashcards(deck_id, created_at);
CREATE INDEX IF NOT EXISTS idx_flashcards_deck_id ON flashcards(deck_id);
CREATE INDEX IF NOT EXISTS idx_flashcards_user_id ON flashcards(user_id);
CREATE INDEX IF NOT EXISTS idx_flashcards_created_at ON flashcards(created_at DESC);
"#;

/// Weighted text-search indexes.
///
/// The indexed expressions must match [`DECK_DOCUMENT`] and
/// [`FLASHCARD_DOCUMENT`] exactly or the planner will not use them.
pub const TEXT_SEARCH_SCHEMA: &str = r#"
CREATE INDEX IF NOT EXISTS idx_decks_text ON decks USING GIN (
    (setweight(to_tsvector('english', name), 'A')
        || setweight(to_tsvector('english', coalesce(description, '')), 'B'))
);

CREATE INDEX IF NOT EXISTS idx_flashcards_text ON flashcards USING GIN (
    (setweight(to_tsvector('english', question), 'A')
        || setweight(to_tsvector('english', answer), 'B'))
);
"#;

/// Search document for a deck row aliased `d`
pub const DECK_DOCUMENT: &str = "(setweight(to_tsvector('english', d.name), 'A') \
     || setweight(to_tsvector('english', coalesce(d.description, '')), 'B'))";

/// Search document for a flashcard row aliased `f`
pub const FLASHCARD_DOCUMENT: &str = "(setweight(to_tsvector('english', f.question), 'A') \
     || setweight(to_tsvector('english', f.answer), 'B'))";

/// Full database schema with all tables, in dependency order
pub fn full_schema() -> String {
    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        USERS_SCHEMA, DECKS_SCHEMA, FLASHCARDS_SCHEMA, TEXT_SEARCH_SCHEMA
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_created_before_dependents() {
        let schema = full_schema();
        let users = schema.find("CREATE TABLE IF NOT EXISTS users").unwrap();
        let decks = schema.find("CREATE TABLE IF NOT EXISTS decks").unwrap();
        let flashcards = schema.find("CREATE TABLE IF NOT EXISTS flashcards").unwrap();
        let text = schema.find("idx_decks_text").unwrap();

        assert!(users < decks);
        assert!(decks < flashcards);
        assert!(flashcards < text);
    }

    #[test]
    fn test_every_statement_is_idempotent() {
        let schema = full_schema();
        let creates = schema.matches("CREATE ").count();
        let guarded = schema.matches("IF NOT EXISTS").count();
        assert_eq!(creates, guarded);
    }

    #[test]
    fn test_required_indexes_present() {
        let schema = full_schema();
        for index in [
            "idx_users_created_at",
            "idx_decks_user_id",
            "idx_decks_is_public",
            "idx_decks_name",
            "idx_decks_created_at",
            "idx_flashcards_deck_id",
            "idx_flashcards_user_id",
            "idx_flashcards_created_at",
            "idx_decks_text",
            "idx_flashcards_text",
        ] {
            assert!(schema.contains(index), "missing index {index}");
        }
        assert!(schema.contains("UNIQUE (email)"));
        assert!(schema.contains("UNIQUE (username)"));
    }

    #[test]
    fn test_documents_match_indexed_expressions() {
        let strip_alias = |s: &str| s.replace("d.", "").replace("f.", "").replace(' ', "");
        let indexed = TEXT_SEARCH_SCHEMA.replace([' ', '\n'], "");

        assert!(indexed.contains(&strip_alias(DECK_DOCUMENT)));
        assert!(indexed.contains(&strip_alias(FLASHCARD_DOCUMENT)));
    }

    #[test]
    fn test_weight_classes() {
        assert!(DECK_DOCUMENT.contains("'A'") && DECK_DOCUMENT.contains("'B'"));
        assert!(FLASHCARD_DOCUMENT.contains("'A'") && FLASHCARD_DOCUMENT.contains("'B'"));
        assert_eq!(RANK_WEIGHTS, "{0.1, 0.2, 0.5, 1.0}");
    }
}
