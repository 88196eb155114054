//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

/// The app's navigation bar.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::DASHBOARD_VIEW,
                title: "Dashboard",
                is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
            },
            Link {
                url: endpoints::CHARTS_VIEW,
                title: "Charts",
                is_current: active_endpoint == endpoints::CHARTS_VIEW,
            },
            Link {
                url: endpoints::SETTINGS_VIEW,
                title: "Settings",
                is_current: active_endpoint == endpoints::SETTINGS_VIEW,
            },
        ];

        NavBar { links }
    }

    /// Render the navigation bar as HTML.
    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900 sticky top-0 z-40 shadow-sm"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::DASHBOARD_VIEW)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        img src="/static/favicon-32x32.png" class="h-8" alt="Expenseur logo";

                        span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Expenseur"
                        }
                    }

                    div class="w-auto"
                    {
                        ul
                            class="font-medium flex flex-row items-center
                                space-x-4 lg:space-x-8 rtl:space-x-reverse"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }

                            li
                            {
                                a
                                    href=(endpoints::LOG_OUT)
                                    class="block py-2 px-3 text-gray-900 rounded-sm
                                        hover:bg-gray-100 lg:hover:bg-transparent lg:border-0
                                        lg:hover:text-blue-700 lg:p-0 dark:text-white
                                        lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
                                        dark:hover:text-white lg:dark:hover:bg-transparent"
                                {
                                    "Log out"
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints;

    use super::NavBar;

    #[test]
    fn contains_links_to_every_page() {
        let html = NavBar::new(endpoints::DASHBOARD_VIEW).into_html().into_string();

        for endpoint in [
            endpoints::DASHBOARD_VIEW,
            endpoints::CHARTS_VIEW,
            endpoints::SETTINGS_VIEW,
            endpoints::LOG_OUT,
        ] {
            assert!(
                html.contains(&format!("href=\"{endpoint}\"")),
                "expected a link to {endpoint}"
            );
        }
    }
}
