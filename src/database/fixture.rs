use rusqlite::Connection;

use crate::database::archive::Archive;
use crate::database::schema::SCHEMA;

const DATA: &str = "
    INSERT INTO persons (id, name, normalized_name, birth_year, death_year, nationality) VALUES
        (1, 'Henrik Ibsen', 'henrik ibsen', 1828, 1906, 'Norsk'),
        (2, 'Arild Brinchmann', 'arild brinchmann', 1922, 1995, 'Norsk'),
        (3, 'Liv Ullmann', 'liv ullmann', 1938, NULL, 'Norsk'),
        (4, 'Toralf Sandø', 'toralf sando', 1899, 1980, 'Norsk'),
        (5, 'Ludvig Holberg', 'ludvig holberg', 1684, 1754, 'Dansk-norsk'),
        (6, 'Edvard Grieg', 'edvard grieg', 1843, 1907, 'Norsk');

    INSERT INTO plays (id, title, playwright_id, year_written, work_type, synopsis) VALUES
        (1, 'Peer Gynt', 1, 1867, 'teaterstykke', 'Dramatisk dikt'),
        (2, 'Et dukkehjem', 1, 1879, 'teaterstykke', NULL),
        (3, 'Jeppe på Bjerget', 5, 1722, 'teaterstykke', NULL),
        (4, 'Hedda Gabler', 1, 1890, 'teaterstykke', NULL);

    INSERT INTO performances (id, work_id, year, title, description, venue, total_duration) VALUES
        (1, 1, 1975, 'Peer Gynt', 'Fjernsynsteatrets oppsetning', 'NRK Fjernsynsteatret', 9000),
        (2, 1, 1993, 'Peer Gynt', NULL, NULL, 7200),
        (3, 2, 1974, 'Et dukkehjem', 'Nora forlater Helmer', NULL, 6000),
        (4, 3, 1980, 'Jeppe på Bjerget', NULL, NULL, 5400),
        (5, NULL, 1969, 'Kveldstund med Grieg', 'Konsert', NULL, 3600);

    INSERT INTO episodes (prf_id, title, description, year, duration_seconds, image_url, play_id,
                          performance_id, part_number, total_parts, is_introduction, media_type) VALUES
        ('FTEA00001175', 'Peer Gynt - del 1', 'Ibsens dramatiske dikt', 1975, 4500,
         'https://gfx.nrk.no/peer1/960', 1, 1, 1, 2, 0, 'part'),
        ('FTEA00002175', 'Peer Gynt - del 2', 'Ibsens dramatiske dikt', 1975, 4500,
         NULL, 1, 1, 2, 2, 0, 'part'),
        ('FTEA00003175', 'Introduksjon til Peer Gynt', NULL, 1975, 600,
         NULL, 1, 1, NULL, NULL, 1, 'intro'),
        ('FTEA00001993', 'Peer Gynt', NULL, 1993, 7200, NULL, 1, 2, NULL, NULL, 0, 'episode'),
        ('FTEA00001974', 'Et dukkehjem', 'Nora forlater Helmer', 1974, 6000,
         NULL, 2, 3, NULL, NULL, 0, 'episode'),
        ('FTEA00001980', 'Jeppe på Bjerget', 'Komedie av Holberg', 1980, 5400,
         NULL, 3, 4, NULL, NULL, 0, 'episode'),
        ('MUHH00001969', 'Kveldstund med Grieg', NULL, NULL, 3600, NULL, NULL, 5, NULL, NULL, 0, NULL);

    INSERT INTO episode_persons (episode_id, person_id, role, character_name) VALUES
        ('FTEA00001175', 4, 'actor', 'Peer'),
        ('FTEA00001175', 3, 'actor', 'Solveig'),
        ('FTEA00001175', 1, 'playwright', NULL),
        ('FTEA00001175', 2, 'director', NULL),
        ('FTEA00002175', 2, 'director', NULL),
        ('FTEA00002175', 4, 'actor', 'Peer'),
        ('FTEA00001974', 2, 'director', NULL),
        ('FTEA00001974', 3, 'actor', 'Nora'),
        ('FTEA00001980', 4, 'actor', 'Jeppe'),
        ('FTEA00001993', 3, 'director', NULL);

    INSERT INTO performance_persons (performance_id, person_id, role, character_name) VALUES
        (1, 4, 'actor', 'Peer'),
        (1, 3, 'actor', 'Solveig'),
        (1, 1, 'playwright', NULL),
        (1, 2, 'director', NULL),
        (2, 3, 'director', NULL),
        (3, 2, 'director', NULL),
        (3, 3, 'actor', 'Nora'),
        (4, 4, 'actor', 'Jeppe'),
        (5, 6, 'composer', NULL),
        (5, 2, 'forfatter', NULL),
        (2, 1, 'director', NULL),
        (3, 1, 'actor', 'Helmer'),
        (4, 1, 'director', NULL),
        (5, 6, 'orchestra', NULL);

    UPDATE performances SET about_person_id = 6 WHERE id = 5;
    UPDATE episodes SET about_person_id = 6 WHERE prf_id = 'MUHH00001969';
    UPDATE episodes SET about_person_id = 1 WHERE prf_id IN ('FTEA00003175', 'FTEA00001974');

    INSERT INTO tags (id, name, display_name, color) VALUES
        (1, 'ibsen', 'Ibsen', '#aa0000'),
        (2, 'klassiker', 'Klassiker', NULL),
        (3, 'komedie', 'Komedie', '#00aa00');

    INSERT INTO episode_tags (episode_id, tag_id) VALUES
        ('FTEA00001175', 1),
        ('FTEA00001175', 2),
        ('FTEA00001974', 1),
        ('FTEA00001980', 3);

    INSERT INTO play_tags (play_id, tag_id) VALUES
        (1, 1),
        (1, 2),
        (2, 1),
        (3, 3);

    INSERT INTO play_external_links (id, play_id, url, title, type, access_note) VALUES
        (1, 1, 'https://bokselskap.no/peer-gynt', 'Peer Gynt (Bokselskap)', 'ebook', 'Gratis'),
        (2, 1, 'https://ibsen.uio.no/peer-gynt', 'Henrik Ibsens skrifter', 'text', NULL);

    INSERT INTO nrk_about_programs (id, person_id, title, nrk_url, program_type, year, interest_score) VALUES
        ('OBJE00001', 1, 'Ibsen og verden', 'https://tv.nrk.no/program/OBJE00001', 'documentary', 2006, 5),
        ('OBJE00002', 1, 'Portrett av Ibsen', 'https://tv.nrk.no/program/OBJE00002', 'portrait', 1978, 9);

    INSERT INTO metadata (key, value) VALUES
        ('build_date', '2026-01-15'),
        ('source', NULL);
";

/// Small archive with a handful of Ibsen and Holberg stagings.
pub(crate) fn archive() -> Archive {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    conn.execute_batch(SCHEMA).expect("create schema");
    conn.execute_batch(DATA).expect("insert fixture rows");
    Archive::from_connection(conn).expect("wrap fixture connection")
}
