//! String-keyed navigation routes.
//!
//! Presentation navigates with paths such as `product/PFI001` built from
//! identifiers in a rendered snapshot. Resolution maps them back to
//! records by linear lookup in that snapshot.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::catalog::{Category, Offer, Product};
use crate::view::ViewState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Empty route")]
    Empty,

    #[error("Unknown route '{route}'")]
    Unknown { route: String },

    #[error("Route '{route}' requires a {param}")]
    MissingParam { route: String, param: &'static str },
}

/// A route resolved against a snapshot that lacked the record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Catalog not loaded yet")]
    NotLoaded,

    #[error("Product '{id}' not found")]
    ProductNotFound { id: String },

    #[error("Offer '{code}' not found")]
    OfferNotFound { code: String },

    #[error("Category '{code}' not found")]
    CategoryNotFound { code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Favorites,
    About,
    Product { id: String },
    Offer { code: String },
    Category { code: String },
}

impl Route {
    pub fn product(product: &Product) -> Self {
        Self::Product {
            id: product.id.to_string(),
        }
    }

    pub fn offer(offer: &Offer) -> Self {
        Self::Offer {
            code: offer.code.clone(),
        }
    }

    pub fn category(category: &Category) -> Self {
        Self::Category {
            code: category.code.clone(),
        }
    }

    /// Resolve against a published snapshot.
    ///
    /// Top-level screens always resolve; entity routes need `HasData`
    /// and a matching record.
    pub fn resolve(&self, state: &ViewState) -> Result<Destination, LookupError> {
        match self {
            Route::Home => Ok(Destination::Home),
            Route::About => Ok(Destination::About),
            Route::Favorites => Ok(Destination::Favorites {
                products: state.favorite_products().into_iter().cloned().collect(),
            }),
            Route::Product { id } => {
                require_data(state)?;
                state
                    .products()
                    .iter()
                    .find(|p| p.id.as_str() == id)
                    .cloned()
                    .map(Destination::Product)
                    .ok_or_else(|| LookupError::ProductNotFound { id: id.clone() })
            }
            Route::Offer { code } => {
                require_data(state)?;
                state
                    .offers()
                    .iter()
                    .find(|o| &o.code == code)
                    .cloned()
                    .map(Destination::Offer)
                    .ok_or_else(|| LookupError::OfferNotFound { code: code.clone() })
            }
            Route::Category { code } => {
                require_data(state)?;
                let category = state
                    .categories()
                    .iter()
                    .find(|c| &c.code == code)
                    .cloned()
                    .ok_or_else(|| LookupError::CategoryNotFound { code: code.clone() })?;
                let products = state
                    .products_in_category(code)
                    .into_iter()
                    .cloned()
                    .collect();
                Ok(Destination::Category { category, products })
            }
        }
    }
}

fn require_data(state: &ViewState) -> Result<(), LookupError> {
    if state.has_data() {
        Ok(())
    } else {
        Err(LookupError::NotLoaded)
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim().trim_matches('/');
        if path.is_empty() {
            return Err(RouteError::Empty);
        }

        let (head, param) = match path.split_once('/') {
            Some((head, param)) => (head, Some(param)),
            None => (path, None),
        };

        let param_for = |name: &'static str| -> Result<String, RouteError> {
            match param {
                Some(value) if !value.is_empty() => Ok(value.to_string()),
                _ => Err(RouteError::MissingParam {
                    route: head.to_string(),
                    param: name,
                }),
            }
        };

        // Legacy keys (`route.home`, `produto/...`) are accepted as aliases.
        match head {
            "home" | "route.home" if param.is_none() => Ok(Route::Home),
            "favorites" | "route.favorites" if param.is_none() => Ok(Route::Favorites),
            "about" | "route.about" if param.is_none() => Ok(Route::About),
            "product" | "produto" => Ok(Route::Product {
                id: param_for("product id")?,
            }),
            "offer" | "oferta" => Ok(Route::Offer {
                code: param_for("offer code")?,
            }),
            "category" | "categoria" => Ok(Route::Category {
                code: param_for("category code")?,
            }),
            _ => Err(RouteError::Unknown {
                route: path.to_string(),
            }),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("home"),
            Route::Favorites => f.write_str("favorites"),
            Route::About => f.write_str("about"),
            Route::Product { id } => write!(f, "product/{}", id),
            Route::Offer { code } => write!(f, "offer/{}", code),
            Route::Category { code } => write!(f, "category/{}", code),
        }
    }
}

/// The record(s) a route points at.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Home,
    About,
    Favorites { products: Vec<Product> },
    Product(Product),
    Offer(Offer),
    Category {
        category: Category,
        products: Vec<Product>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_level_routes() {
        assert_eq!("home".parse::<Route>(), Ok(Route::Home));
        assert_eq!("/favorites/".parse::<Route>(), Ok(Route::Favorites));
        assert_eq!(" about ".parse::<Route>(), Ok(Route::About));
    }

    #[test]
    fn test_parse_entity_routes() {
        assert_eq!(
            "product/PFI001".parse::<Route>(),
            Ok(Route::Product {
                id: "PFI001".to_string()
            })
        );
        assert_eq!(
            "category/cat:fem".parse::<Route>(),
            Ok(Route::Category {
                code: "cat:fem".to_string()
            })
        );
    }

    #[test]
    fn test_parse_legacy_aliases() {
        assert_eq!("route.home".parse::<Route>(), Ok(Route::Home));
        assert_eq!("route.favorites".parse::<Route>(), Ok(Route::Favorites));
        assert_eq!("route.about".parse::<Route>(), Ok(Route::About));
        assert_eq!(
            "produto/MASC002".parse::<Route>(),
            Ok(Route::Product {
                id: "MASC002".to_string()
            })
        );
        assert_eq!(
            "oferta/of:bel001".parse::<Route>(),
            Ok(Route::Offer {
                code: "of:bel001".to_string()
            })
        );
        assert_eq!(
            "categoria/cat:inf".parse::<Route>(),
            Ok(Route::Category {
                code: "cat:inf".to_string()
            })
        );
        assert!(matches!(
            "produto".parse::<Route>(),
            Err(RouteError::MissingParam { param: "product id", .. })
        ));
        assert_eq!(
            "categoria/cat:inf".parse::<Route>().unwrap().to_string(),
            "category/cat:inf"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Route>(), Err(RouteError::Empty));
        assert!(matches!(
            "product".parse::<Route>(),
            Err(RouteError::MissingParam { param: "product id", .. })
        ));
        assert!(matches!(
            "checkout/1".parse::<Route>(),
            Err(RouteError::Unknown { .. })
        ));
        assert!(matches!(
            "home/extra".parse::<Route>(),
            Err(RouteError::Unknown { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let route = Route::Offer {
            code: "of:bel002".to_string(),
        };
        assert_eq!(route.to_string().parse::<Route>(), Ok(route));
    }

    #[test]
    fn test_entity_route_on_no_data_is_not_loaded() {
        let state = ViewState::NoData {
            is_loading: true,
            search_input: String::new(),
        };
        let route = Route::Product {
            id: "PFI001".to_string(),
        };
        assert_eq!(route.resolve(&state), Err(LookupError::NotLoaded));
        assert_eq!(Route::Home.resolve(&state), Ok(Destination::Home));
    }
}
