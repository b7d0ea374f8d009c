/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

macro_rules! obj_from_method {
    ( $c:expr, $method:expr, $params:expr, $rt: ty, $r: ident) => {{
        $c.call::<$rt>($method, $params).await.map(|mut v| {
            v.$r.client = Some($c.clone());
            v.$r
        })
    }};
}

macro_rules! stream_pages_from_method {
    ( $c:expr, $method:expr, $params:expr, $rt: ty, $r: ident, $items: ident) => {{
        try_stream! {
            let mut page: u64 = 1;
            loop {
                let page_str = page.to_string();
                let per_page_str = NUM_TO_GET.to_string();
                let mut params: Vec<(&str, &str)> = $params.to_vec();
                params.push(("page", page_str.as_str()));
                params.push(("per_page", per_page_str.as_str()));

                log::debug!("{} page {}", $method, page);
                let resp = $c.call::<$rt>($method, &params).await?.$r;
                let pages = resp.pages;
                for mut item in resp.$items {
                    item.client = Some($c.clone());
                    yield item
                }

                if page >= pages {
                    break;
                }
                page += 1;
            }
        }
    }};
}

pub(crate) use {obj_from_method, stream_pages_from_method};
