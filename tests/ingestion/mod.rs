mod test_fetcher;
mod test_services;
