//! Resource accessors, one method per operation.
//!
//! Every method validates its [`Params`] against the operation's catalog
//! entry and resolves to the decoded response body.

use serde_json::Value;

use crate::api_client::FaceitClient;
use crate::catalog::Operation;
use crate::error::Error;
use crate::params::Params;

macro_rules! namespace {
    ($(#[$doc:meta])* $name:ident { $($(#[$mdoc:meta])* $method:ident => $op:ident,)* }) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name<'a> {
            client: &'a FaceitClient,
        }

        impl<'a> $name<'a> {
            $(
                $(#[$mdoc])*
                pub async fn $method(self, params: &Params) -> Result<Value, Error> {
                    self.client.call(Operation::$op, params).await
                }
            )*
        }
    };
}

namespace!(
    /// `games/...`
    Games {
        /// All games. Optional: `offset`, `limit`.
        all => GamesAll,
        /// Requires `game_id`.
        show => GamesShow,
        /// Parent game of `game_id`.
        parent => GamesParent,
    }
);

namespace!(
    /// `players/...`
    Players {
        /// Looks a player up by `nickname`, `game` and/or `game_player_id`.
        /// Every key of the bag is forwarded as query.
        get => PlayersGet,
        show => PlayersShow,
        /// Requires `player_id` and `game`. Optional: `from`, `to`
        /// (Unix seconds or dates), `offset`, `limit`.
        history => PlayersHistory,
        hubs => PlayersHubs,
        /// Requires `player_id` and `game_id`.
        stats => PlayersStats,
        tournaments => PlayersTournaments,
        teams => PlayersTeams,
    }
);

namespace!(
    /// `teams/...`
    Teams {
        show => TeamsShow,
        stats => TeamsStats,
        tournaments => TeamsTournaments,
    }
);

namespace!(
    /// `matches/...`
    Matches {
        show => MatchesShow,
        stats => MatchesStats,
    }
);

namespace!(
    /// `championships/...`
    Championships {
        /// Requires `game`. Optional: `type`, `offset`, `limit`.
        all => ChampionshipsAll,
        /// Optional `expanded`, e.g. `["organizer", "game"]`.
        show => ChampionshipsShow,
        matches => ChampionshipsMatches,
        subscriptions => ChampionshipsSubscriptions,
        results => ChampionshipsResults,
    }
);

namespace!(
    /// `hubs/...`
    Hubs {
        show => HubsShow,
        matches => HubsMatches,
        members => HubsMembers,
        roles => HubsRoles,
        rules => HubsRules,
        stats => HubsStats,
    }
);

namespace!(
    /// `leaderboards/...`, see also [`Leaderboards::championships`] and
    /// [`Leaderboards::hubs`].
    Leaderboards {
        show => LeaderboardsShow,
        player => LeaderboardsPlayer,
    }
);

namespace!(
    /// `leaderboards/championships/...`
    ChampionshipLeaderboards {
        all => LeaderboardsChampionshipsAll,
        /// Requires `championship_id` and `group`.
        group => LeaderboardsChampionshipsGroup,
    }
);

namespace!(
    /// `leaderboards/hubs/...`
    HubLeaderboards {
        all => LeaderboardsHubsAll,
        general => LeaderboardsHubsGeneral,
        /// Requires `hub_id` and `season`.
        season => LeaderboardsHubsSeason,
    }
);

namespace!(
    /// `rankings/...`
    Rankings {
        /// Requires `game_id` and `region`. Optional: `country`, `offset`, `limit`.
        game => RankingsGame,
        /// Requires `game_id`, `region` and `player_id`. Optional: `country`, `limit`.
        player => RankingsPlayer,
    }
);

namespace!(
    /// `organizers/...`
    Organizers {
        /// Organizer by `name`.
        get => OrganizersGet,
        show => OrganizersShow,
        championships => OrganizersChampionships,
        games => OrganizersGames,
        hubs => OrganizersHubs,
        tournaments => OrganizersTournaments,
    }
);

namespace!(
    /// `search/...`
    Search {
        championships => SearchChampionships,
        hubs => SearchHubs,
        organizers => SearchOrganizers,
        /// Requires `nickname`. Optional: `game`, `country`, `offset`, `limit`.
        players => SearchPlayers,
        teams => SearchTeams,
        tournaments => SearchTournaments,
    }
);

namespace!(
    /// `tournaments/...`
    Tournaments {
        all => TournamentsAll,
        show => TournamentsShow,
        brackets => TournamentsBrackets,
        matches => TournamentsMatches,
        teams => TournamentsTeams,
    }
);

impl<'a> Leaderboards<'a> {
    pub fn championships(&self) -> ChampionshipLeaderboards<'a> {
        ChampionshipLeaderboards {
            client: self.client,
        }
    }

    pub fn hubs(&self) -> HubLeaderboards<'a> {
        HubLeaderboards {
            client: self.client,
        }
    }
}

impl FaceitClient {
    pub fn games(&self) -> Games<'_> {
        Games { client: self }
    }

    pub fn players(&self) -> Players<'_> {
        Players { client: self }
    }

    pub fn teams(&self) -> Teams<'_> {
        Teams { client: self }
    }

    pub fn matches(&self) -> Matches<'_> {
        Matches { client: self }
    }

    pub fn championships(&self) -> Championships<'_> {
        Championships { client: self }
    }

    pub fn hubs(&self) -> Hubs<'_> {
        Hubs { client: self }
    }

    pub fn leaderboards(&self) -> Leaderboards<'_> {
        Leaderboards { client: self }
    }

    pub fn rankings(&self) -> Rankings<'_> {
        Rankings { client: self }
    }

    pub fn organizers(&self) -> Organizers<'_> {
        Organizers { client: self }
    }

    pub fn search(&self) -> Search<'_> {
        Search { client: self }
    }

    pub fn tournaments(&self) -> Tournaments<'_> {
        Tournaments { client: self }
    }
}
