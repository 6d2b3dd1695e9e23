/// Layout of the archive image as produced by the database build step.
/// Only used to create fixtures; loaded images are checked against
/// `REQUIRED_TABLES` instead of being migrated.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS persons (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        normalized_name TEXT,
        birth_year INTEGER,
        death_year INTEGER,
        nationality TEXT,
        bio TEXT,
        wikidata_id TEXT,
        sceneweb_id INTEGER,
        sceneweb_url TEXT,
        wikipedia_url TEXT,
        image_url TEXT
    );

    CREATE TABLE IF NOT EXISTS plays (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        original_title TEXT,
        playwright_id INTEGER,
        year_written INTEGER,
        work_type TEXT,
        synopsis TEXT,
        wikidata_id TEXT,
        sceneweb_id INTEGER,
        sceneweb_url TEXT,
        wikipedia_url TEXT,
        FOREIGN KEY(playwright_id) REFERENCES persons(id)
    );

    CREATE TABLE IF NOT EXISTS performances (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        work_id INTEGER,
        source TEXT DEFAULT 'nrk',
        year INTEGER,
        title TEXT,
        description TEXT,
        venue TEXT,
        total_duration INTEGER,
        image_url TEXT,
        medium TEXT DEFAULT 'tv',
        about_person_id INTEGER,
        FOREIGN KEY(work_id) REFERENCES plays(id)
    );

    CREATE TABLE IF NOT EXISTS episodes (
        prf_id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        year INTEGER,
        duration_seconds INTEGER,
        image_url TEXT,
        nrk_url TEXT,
        play_id INTEGER,
        performance_id INTEGER,
        source TEXT DEFAULT 'nrk',
        medium TEXT DEFAULT 'tv',
        part_number INTEGER,
        total_parts INTEGER,
        is_introduction INTEGER,
        parent_episode_id TEXT,
        media_type TEXT,
        about_person_id INTEGER,
        FOREIGN KEY(play_id) REFERENCES plays(id),
        FOREIGN KEY(performance_id) REFERENCES performances(id)
    );

    CREATE TABLE IF NOT EXISTS episode_persons (
        id INTEGER PRIMARY KEY,
        episode_id TEXT NOT NULL,
        person_id INTEGER NOT NULL,
        role TEXT,
        character_name TEXT,
        FOREIGN KEY(episode_id) REFERENCES episodes(prf_id),
        FOREIGN KEY(person_id) REFERENCES persons(id)
    );

    CREATE TABLE IF NOT EXISTS performance_persons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        performance_id INTEGER NOT NULL,
        person_id INTEGER NOT NULL,
        role TEXT,
        character_name TEXT,
        UNIQUE(performance_id, person_id, role, character_name),
        FOREIGN KEY(performance_id) REFERENCES performances(id),
        FOREIGN KEY(person_id) REFERENCES persons(id)
    );

    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY,
        name TEXT UNIQUE NOT NULL,
        display_name TEXT NOT NULL,
        color TEXT
    );

    CREATE TABLE IF NOT EXISTS episode_tags (
        episode_id TEXT NOT NULL,
        tag_id INTEGER NOT NULL,
        PRIMARY KEY(episode_id, tag_id),
        FOREIGN KEY(episode_id) REFERENCES episodes(prf_id),
        FOREIGN KEY(tag_id) REFERENCES tags(id)
    );

    CREATE TABLE IF NOT EXISTS play_tags (
        play_id INTEGER NOT NULL,
        tag_id INTEGER NOT NULL,
        PRIMARY KEY(play_id, tag_id),
        FOREIGN KEY(play_id) REFERENCES plays(id),
        FOREIGN KEY(tag_id) REFERENCES tags(id)
    );

    CREATE TABLE IF NOT EXISTS play_external_links (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        play_id INTEGER NOT NULL,
        url TEXT NOT NULL,
        title TEXT,
        type TEXT,
        description TEXT,
        access_note TEXT,
        FOREIGN KEY(play_id) REFERENCES plays(id)
    );

    CREATE TABLE IF NOT EXISTS nrk_about_programs (
        id TEXT PRIMARY KEY,
        person_id INTEGER,
        title TEXT,
        description TEXT,
        duration_seconds INTEGER,
        nrk_url TEXT,
        image_url TEXT,
        program_type TEXT,
        year INTEGER,
        episode_count INTEGER,
        interest_score INTEGER DEFAULT 0,
        FOREIGN KEY(person_id) REFERENCES persons(id)
    );

    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY,
        value TEXT
    );
";

/// Tables every query in this crate touches.
pub const REQUIRED_TABLES: &[&str] = &[
    "persons",
    "plays",
    "performances",
    "episodes",
    "episode_persons",
    "performance_persons",
    "tags",
    "episode_tags",
];

/// Tables some queries touch; absent ones make those queries fail but the
/// image is still usable.
pub const OPTIONAL_TABLES: &[&str] = &[
    "play_tags",
    "play_external_links",
    "nrk_about_programs",
    "metadata",
];
