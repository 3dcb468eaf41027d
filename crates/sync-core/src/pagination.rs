use crate::error::Result;

/// Fetch every page of a page-numbered collection.
///
/// `fetch_page` receives a 1-based page number and the page size. Fetching stops
/// on an empty or short page. There is no item cap, since existence snapshots
/// must see every item.
pub fn fetch_all_pages<T, F>(mut fetch_page: F, per_page: usize) -> Result<Vec<T>>
where
    F: FnMut(usize, usize) -> Result<Vec<T>>,
{
    let per_page = per_page.max(1);
    let mut all_results = Vec::new();
    let mut page = 1;

    loop {
        let page_results = fetch_page(page, per_page)?;
        let page_len = page_results.len();

        all_results.extend(page_results);

        if page_len < per_page {
            break;
        }

        page += 1;
    }

    Ok(all_results)
}
