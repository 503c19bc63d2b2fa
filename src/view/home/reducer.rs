use crate::favorites::FavoritesSnapshot;
use crate::view::home::intent::HomeIntent;
use crate::view::home::state::HomeModel;
use crate::view::mvi::Reducer;

pub struct HomeReducer;

impl Reducer for HomeReducer {
    type State = HomeModel;
    type Intent = HomeIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            HomeIntent::RefreshStarted => HomeModel {
                is_loading: true,
                ..state
            },
            HomeIntent::CatalogLoaded { catalog, favorites } => HomeModel {
                catalog: Some(catalog),
                favorites: newer(state.favorites, favorites),
                is_loading: false,
                search_input: state.search_input,
            },
            HomeIntent::CatalogFailed => HomeModel {
                is_loading: false,
                ..state
            },
            HomeIntent::FavoritesChanged(favorites) => HomeModel {
                favorites: newer(state.favorites, favorites),
                ..state
            },
            HomeIntent::SearchInput(search_input) => HomeModel {
                search_input,
                ..state
            },
        }
    }
}

/// Feed items can arrive after a fresher value was read directly from
/// the store; revisions keep the model from stepping backwards.
fn newer(current: FavoritesSnapshot, incoming: FavoritesSnapshot) -> FavoritesSnapshot {
    if incoming.revision >= current.revision {
        incoming
    } else {
        current
    }
}
