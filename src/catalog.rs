//! Every operation of the data api, with its path template and the
//! parameters it accepts.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Declared type of a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Kind {
    String,
    NonEmptyString,
    Number,
    /// Unix seconds, given either as a number or as a date.
    Timestamp,
    ArrayOfString,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String | Kind::NonEmptyString => "String",
            Kind::Number | Kind::Timestamp => "Number",
            Kind::ArrayOfString => "Array[String]",
            Kind::Object => "Object",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub kind: Kind,
    pub location: Location,
    pub required: bool,
}

impl Param {
    /// A `{name}` placeholder in the path template.
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            kind: Kind::NonEmptyString,
            location: Location::Path,
            required: true,
        }
    }

    pub const fn query(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            location: Location::Query,
            required: false,
        }
    }

    pub const fn required_query(name: &'static str) -> Self {
        Self {
            name,
            kind: Kind::NonEmptyString,
            location: Location::Query,
            required: true,
        }
    }
}

/// How the query string of an operation is assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Only declared query parameters, in declaration order.
    Declared,
    /// Every entry of the bag, in insertion order.
    PassThrough,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub params: &'static [Param],
    pub query: QueryMode,
}

impl Endpoint {
    pub fn path_params(&self) -> impl Iterator<Item = &'static Param> {
        self.params
            .iter()
            .filter(|p| p.location == Location::Path)
    }

    pub fn query_params(&self) -> impl Iterator<Item = &'static Param> {
        self.params
            .iter()
            .filter(|p| p.location == Location::Query)
    }
}

const OFFSET: Param = Param::query("offset", Kind::Number);
const LIMIT: Param = Param::query("limit", Kind::Number);
const TYPE: Param = Param::query("type", Kind::String);
const EXPANDED: Param = Param::query("expanded", Kind::ArrayOfString);
const GAME: Param = Param::query("game", Kind::String);
const REGION: Param = Param::query("region", Kind::String);
const COUNTRY: Param = Param::query("country", Kind::String);

macro_rules! catalog {
    ($($op:ident => $name:literal, $path:literal, $params:expr, $query:ident;)*) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Operation {
            $($op,)*
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[$(Operation::$op,)*];

            /// Dotted name, e.g. `players.history`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Operation::$op => $name,)*
                }
            }

            pub fn endpoint(self) -> &'static Endpoint {
                match self {
                    $(Operation::$op => {
                        static ENDPOINT: Endpoint = Endpoint {
                            path: $path,
                            params: $params,
                            query: QueryMode::$query,
                        };
                        &ENDPOINT
                    })*
                }
            }
        }
    };
}

catalog! {
    GamesAll => "games.all", "games", &[OFFSET, LIMIT], Declared;
    GamesShow => "games.show", "games/{game_id}", &[Param::path("game_id")], Declared;
    GamesParent => "games.parent", "games/{game_id}/parent", &[Param::path("game_id")], Declared;

    PlayersGet => "players.get", "players", &[
        Param::query("nickname", Kind::String),
        GAME,
        Param::query("game_player_id", Kind::String),
    ], PassThrough;
    PlayersShow => "players.show", "players/{player_id}", &[Param::path("player_id")], Declared;
    PlayersHistory => "players.history", "players/{player_id}/history", &[
        Param::path("player_id"),
        Param::required_query("game"),
        Param::query("from", Kind::Timestamp),
        Param::query("to", Kind::Timestamp),
        OFFSET,
        LIMIT,
    ], Declared;
    PlayersHubs => "players.hubs", "players/{player_id}/hubs", &[Param::path("player_id"), OFFSET, LIMIT], Declared;
    PlayersStats => "players.stats", "players/{player_id}/stats/{game_id}", &[
        Param::path("player_id"),
        Param::path("game_id"),
    ], Declared;
    PlayersTournaments => "players.tournaments", "players/{player_id}/tournaments", &[
        Param::path("player_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    PlayersTeams => "players.teams", "players/{player_id}/teams", &[Param::path("player_id"), OFFSET, LIMIT], Declared;

    TeamsShow => "teams.show", "teams/{team_id}", &[Param::path("team_id")], Declared;
    TeamsStats => "teams.stats", "teams/{team_id}/stats/{game_id}", &[
        Param::path("team_id"),
        Param::path("game_id"),
    ], Declared;
    TeamsTournaments => "teams.tournaments", "teams/{team_id}/tournaments", &[
        Param::path("team_id"),
        OFFSET,
        LIMIT,
    ], Declared;

    MatchesShow => "matches.show", "matches/{match_id}", &[Param::path("match_id")], Declared;
    MatchesStats => "matches.stats", "matches/{match_id}/stats", &[Param::path("match_id")], Declared;

    ChampionshipsAll => "championships.all", "championships", &[
        Param::required_query("game"),
        TYPE,
        OFFSET,
        LIMIT,
    ], Declared;
    ChampionshipsShow => "championships.show", "championships/{championship_id}", &[
        Param::path("championship_id"),
        EXPANDED,
    ], Declared;
    ChampionshipsMatches => "championships.matches", "championships/{championship_id}/matches", &[
        Param::path("championship_id"),
        TYPE,
        OFFSET,
        LIMIT,
    ], Declared;
    ChampionshipsSubscriptions => "championships.subscriptions", "championships/{championship_id}/subscriptions", &[
        Param::path("championship_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    ChampionshipsResults => "championships.results", "championships/{championship_id}/results", &[
        Param::path("championship_id"),
        OFFSET,
        LIMIT,
    ], Declared;

    HubsShow => "hubs.show", "hubs/{hub_id}", &[Param::path("hub_id"), EXPANDED], Declared;
    HubsMatches => "hubs.matches", "hubs/{hub_id}/matches", &[Param::path("hub_id"), TYPE, OFFSET, LIMIT], Declared;
    HubsMembers => "hubs.members", "hubs/{hub_id}/members", &[Param::path("hub_id"), OFFSET, LIMIT], Declared;
    HubsRoles => "hubs.roles", "hubs/{hub_id}/roles", &[Param::path("hub_id"), OFFSET, LIMIT], Declared;
    HubsRules => "hubs.rules", "hubs/{hub_id}/rules", &[Param::path("hub_id")], Declared;
    HubsStats => "hubs.stats", "hubs/{hub_id}/stats", &[Param::path("hub_id"), OFFSET, LIMIT], Declared;

    LeaderboardsShow => "leaderboards.show", "leaderboards/{leaderboard_id}", &[
        Param::path("leaderboard_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    LeaderboardsPlayer => "leaderboards.player", "leaderboards/{leaderboard_id}/players/{player_id}", &[
        Param::path("leaderboard_id"),
        Param::path("player_id"),
    ], Declared;
    LeaderboardsChampionshipsAll => "leaderboards.championships.all", "leaderboards/championships/{championship_id}", &[
        Param::path("championship_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    LeaderboardsChampionshipsGroup => "leaderboards.championships.group", "leaderboards/championships/{championship_id}/groups/{group}", &[
        Param::path("championship_id"),
        Param::path("group"),
        OFFSET,
        LIMIT,
    ], Declared;
    LeaderboardsHubsAll => "leaderboards.hubs.all", "leaderboards/hubs/{hub_id}", &[
        Param::path("hub_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    LeaderboardsHubsGeneral => "leaderboards.hubs.general", "leaderboards/hubs/{hub_id}/general", &[
        Param::path("hub_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    LeaderboardsHubsSeason => "leaderboards.hubs.season", "leaderboards/hubs/{hub_id}/seasons/{season}", &[
        Param::path("hub_id"),
        Param::path("season"),
        OFFSET,
        LIMIT,
    ], Declared;

    RankingsGame => "rankings.game", "rankings/games/{game_id}/regions/{region}", &[
        Param::path("game_id"),
        Param::path("region"),
        COUNTRY,
        OFFSET,
        LIMIT,
    ], Declared;
    RankingsPlayer => "rankings.player", "rankings/games/{game_id}/regions/{region}/players/{player_id}", &[
        Param::path("game_id"),
        Param::path("region"),
        Param::path("player_id"),
        COUNTRY,
        LIMIT,
    ], Declared;

    OrganizersGet => "organizers.get", "organizers", &[Param::required_query("name")], Declared;
    OrganizersShow => "organizers.show", "organizers/{organizer_id}", &[Param::path("organizer_id")], Declared;
    OrganizersChampionships => "organizers.championships", "organizers/{organizer_id}/championships", &[
        Param::path("organizer_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    OrganizersGames => "organizers.games", "organizers/{organizer_id}/games", &[Param::path("organizer_id")], Declared;
    OrganizersHubs => "organizers.hubs", "organizers/{organizer_id}/hubs", &[
        Param::path("organizer_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    OrganizersTournaments => "organizers.tournaments", "organizers/{organizer_id}/tournaments", &[
        Param::path("organizer_id"),
        TYPE,
        OFFSET,
        LIMIT,
    ], Declared;

    SearchChampionships => "search.championships", "search/championships", &[
        Param::required_query("name"),
        GAME,
        REGION,
        TYPE,
        OFFSET,
        LIMIT,
    ], Declared;
    SearchHubs => "search.hubs", "search/hubs", &[
        Param::required_query("name"),
        GAME,
        REGION,
        OFFSET,
        LIMIT,
    ], Declared;
    SearchOrganizers => "search.organizers", "search/organizers", &[
        Param::required_query("name"),
        OFFSET,
        LIMIT,
    ], Declared;
    SearchPlayers => "search.players", "search/players", &[
        Param::required_query("nickname"),
        GAME,
        COUNTRY,
        OFFSET,
        LIMIT,
    ], Declared;
    SearchTeams => "search.teams", "search/teams", &[
        Param::required_query("nickname"),
        GAME,
        OFFSET,
        LIMIT,
    ], Declared;
    SearchTournaments => "search.tournaments", "search/tournaments", &[
        Param::required_query("name"),
        GAME,
        REGION,
        TYPE,
        OFFSET,
        LIMIT,
    ], Declared;

    TournamentsAll => "tournaments.all", "tournaments", &[GAME, REGION, OFFSET, LIMIT], Declared;
    TournamentsShow => "tournaments.show", "tournaments/{tournament_id}", &[
        Param::path("tournament_id"),
        EXPANDED,
    ], Declared;
    TournamentsBrackets => "tournaments.brackets", "tournaments/{tournament_id}/brackets", &[
        Param::path("tournament_id"),
    ], Declared;
    TournamentsMatches => "tournaments.matches", "tournaments/{tournament_id}/matches", &[
        Param::path("tournament_id"),
        OFFSET,
        LIMIT,
    ], Declared;
    TournamentsTeams => "tournaments.teams", "tournaments/{tournament_id}/teams", &[
        Param::path("tournament_id"),
        OFFSET,
        LIMIT,
    ], Declared;
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.into()))
    }
}

/// Names of the `{placeholder}` segments of a path template, in order.
#[cfg(test)]
fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        names.push(&rest[start + 1..start + len]);
        rest = &rest[start + len + 1..];
    }
    names
}
